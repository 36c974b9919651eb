//! The punishment ledger.
//!
//! Rows are append-mostly: after insertion the only permitted mutations are
//! attaching a log message reference, silent deactivation when a punishment is
//! superseded, and audited revocation. Rows are never deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "punishment_action")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Internal id of the punished user.
    pub user_id: i32,
    /// Action kind, one of the closed set the domain enum defines.
    pub kind: String,
    /// Internal id of the staff member who issued the action.
    pub performed_by: i32,
    /// Ticket the action was issued in, if any.
    pub ticket_id: Option<i32>,
    /// External id of the public announcement message, attached after the fact.
    pub log_message_id: Option<String>,
    /// Role label for promotions and demotions.
    pub role: Option<String>,
    pub reason: Option<String>,
    pub created_at: String,
    /// Present together with `expires_at`, or both absent for permanent actions.
    pub duration_seconds: Option<i64>,
    pub expires_at: Option<String>,
    pub is_active: bool,
    /// Set exactly once, at revocation time, together with the two fields below.
    pub revoked_by: Option<i32>,
    pub revocation_reason: Option<String>,
    pub revoked_at: Option<String>,
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
    TargetUser,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PerformedBy",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Performer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RevokedBy",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Revoker,
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Ticket,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
