//! Support conversation (ticket) records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Internal id of the user who opened the ticket.
    pub user_id: i32,
    /// External channel identifier of the support conversation.
    #[sea_orm(unique)]
    pub channel_id: String,
    /// External id of the archive log message, attached on close.
    pub log_message_id: Option<String>,
    /// `OPEN` or `CLOSED`.
    pub status: String,
    pub created_at: String,
    /// Free-form ticket category, e.g. `Discord-Complaint`.
    pub ticket_type: Option<String>,
    /// Free-text offender reference for cross-referencing game-side complaints.
    pub offender_identifier: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::punishment_action::Entity")]
    PunishmentAction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::punishment_action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PunishmentAction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
