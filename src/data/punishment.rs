//! Punishment ledger repository.
//!
//! The ledger is append-mostly: rows are inserted active and thereafter only
//! mutated through three narrow paths with different audit obligations:
//! attaching a log reference, silent deactivation when superseded, and audited
//! revocation. The two deactivation paths are deliberately separate operations
//! and must never be collapsed into one.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::{
    error::{internal::InternalError, AppError},
    model::punishment::{
        ActionKind, ActivePunishment, NewActionParam, PunishmentAction, TicketReference,
    },
    util::time::format_timestamp,
};

/// Row shape of the action-to-ticket join behind [`TicketReference`].
#[derive(FromQueryResult)]
struct TicketReferenceRow {
    kind: String,
    channel_id: String,
    log_message_id: Option<String>,
}

/// Repository providing database operations on the punishment ledger.
pub struct PunishmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PunishmentRepository<'a, C> {
    /// Creates a new PunishmentRepository instance.
    ///
    /// # Arguments
    /// - `db` - Connection or open transaction to operate on
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new ledger row with `is_active = true`.
    ///
    /// # Arguments
    /// - `param` - Row contents; expiry must already be at storage precision
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(PunishmentAction)` - The inserted row
    /// - `Err(AppError)` - Database error during insert
    pub async fn insert(
        &self,
        param: NewActionParam,
        now: DateTime<Utc>,
    ) -> Result<PunishmentAction, AppError> {
        let entity = entity::punishment_action::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            performed_by: ActiveValue::Set(param.performed_by),
            ticket_id: ActiveValue::Set(param.ticket_id),
            role: ActiveValue::Set(param.role),
            reason: ActiveValue::Set(param.reason),
            created_at: ActiveValue::Set(format_timestamp(now)),
            duration_seconds: ActiveValue::Set(param.duration_seconds),
            expires_at: ActiveValue::Set(param.expires_at.map(format_timestamp)),
            is_active: ActiveValue::Set(true),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        tracing::info!(
            action_id = entity.id,
            user_id = param.user_id,
            performed_by = param.performed_by,
            kind = param.kind.as_str(),
            "recorded ledger action"
        );

        PunishmentAction::from_entity(entity)
    }

    /// Returns the most recent active row for a user and kind.
    ///
    /// Under the stacking policy at most one such row exists per `(user, kind)`
    /// for stackable kinds; that is a maintained invariant, not a query-time
    /// constraint. Creation-time ties are broken by row id.
    ///
    /// # Returns
    /// - `Ok(Some(ActivePunishment))` - The live row and its expiry
    /// - `Ok(None)` - No active punishment of that kind
    /// - `Err(AppError)` - Database error, or a corrupt stored expiry
    pub async fn get_active(
        &self,
        user_id: i32,
        kind: ActionKind,
    ) -> Result<Option<ActivePunishment>, AppError> {
        let entity = entity::prelude::PunishmentAction::find()
            .filter(entity::punishment_action::Column::UserId.eq(user_id))
            .filter(entity::punishment_action::Column::Kind.eq(kind.as_str()))
            .filter(entity::punishment_action::Column::IsActive.eq(true))
            .order_by_desc(entity::punishment_action::Column::CreatedAt)
            .order_by_desc(entity::punishment_action::Column::Id)
            .one(self.db)
            .await?;

        entity.map(ActivePunishment::from_entity).transpose()
    }

    /// Silently deactivates a superseded row.
    ///
    /// Sets `is_active = false` and leaves all revocation fields null. Used only
    /// by the stacking policy; a superseded punishment is not a revocation and
    /// must not carry an audit trail.
    ///
    /// # Returns
    /// - `Ok(())` - Row deactivated (or no matching row existed)
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn deactivate(&self, action_id: i32) -> Result<(), AppError> {
        entity::prelude::PunishmentAction::update_many()
            .filter(entity::punishment_action::Column::Id.eq(action_id))
            .col_expr(
                entity::punishment_action::Column::IsActive,
                Expr::value(false),
            )
            .exec(self.db)
            .await?;

        tracing::info!(action_id, "silently deactivated superseded action");
        Ok(())
    }

    /// Revokes a row with a full audit trail.
    ///
    /// Sets `is_active = false` together with who revoked, why, and when. The
    /// revocation fields are written exactly once; rows only ever transition
    /// active to inactive.
    ///
    /// # Arguments
    /// - `action_id` - Ledger row to revoke
    /// - `revoked_by` - Internal id of the revoking staff member
    /// - `reason` - Human-readable revocation reason
    /// - `now` - Revocation timestamp
    ///
    /// # Returns
    /// - `Ok(true)` - Row revoked
    /// - `Ok(false)` - No row with that id exists
    /// - `Err(AppError::DbErr)` - Database error during lookup or update
    pub async fn revoke(
        &self,
        action_id: i32,
        revoked_by: i32,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let Some(row) = entity::prelude::PunishmentAction::find_by_id(action_id)
            .one(self.db)
            .await?
        else {
            tracing::warn!(action_id, "attempted to revoke non-existent action");
            return Ok(false);
        };

        let user_id = row.user_id;
        let mut active: entity::punishment_action::ActiveModel = row.into();
        active.is_active = ActiveValue::Set(false);
        active.revoked_by = ActiveValue::Set(Some(revoked_by));
        active.revocation_reason = ActiveValue::Set(Some(reason.to_string()));
        active.revoked_at = ActiveValue::Set(Some(format_timestamp(now)));
        active.update(self.db).await?;

        tracing::info!(action_id, user_id, revoked_by, "revoked action");
        Ok(true)
    }

    /// Attaches the public announcement message to a row after the fact.
    ///
    /// Announcements are posted after the ledger write, so the reference arrives
    /// as a second small mutation.
    ///
    /// # Returns
    /// - `Ok(true)` - Reference attached
    /// - `Ok(false)` - No row with that id exists
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn attach_log_reference(
        &self,
        action_id: i32,
        log_message_id: &str,
    ) -> Result<bool, AppError> {
        let result = entity::prelude::PunishmentAction::update_many()
            .filter(entity::punishment_action::Column::Id.eq(action_id))
            .col_expr(
                entity::punishment_action::Column::LogMessageId,
                Expr::value(log_message_id),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts the currently active warns of a user.
    pub async fn count_active_warns(&self, user_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::PunishmentAction::find()
            .filter(entity::punishment_action::Column::UserId.eq(user_id))
            .filter(entity::punishment_action::Column::Kind.eq(ActionKind::Warn.as_str()))
            .filter(entity::punishment_action::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Deactivates every active warn of a user in one sweep.
    ///
    /// A systemic reset after escalation, not an individual pardon, so no
    /// revocation trail is written.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of warns swept
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn deactivate_all_warns(&self, user_id: i32) -> Result<u64, AppError> {
        let result = entity::prelude::PunishmentAction::update_many()
            .filter(entity::punishment_action::Column::UserId.eq(user_id))
            .filter(entity::punishment_action::Column::Kind.eq(ActionKind::Warn.as_str()))
            .filter(entity::punishment_action::Column::IsActive.eq(true))
            .col_expr(
                entity::punishment_action::Column::IsActive,
                Expr::value(false),
            )
            .exec(self.db)
            .await?;

        tracing::info!(
            user_id,
            swept = result.rows_affected,
            "deactivated all active warns after reaching the warn limit"
        );
        Ok(result.rows_affected)
    }

    /// Whether any ledger row references the given ticket.
    ///
    /// The command layer checks this before punishing inside a ticket, so each
    /// complaint yields at most one disciplinary outcome.
    pub async fn ticket_has_punishment(&self, ticket_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::PunishmentAction::find()
            .filter(entity::punishment_action::Column::TicketId.eq(ticket_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Active actions of a user joined to their originating tickets, newest first.
    ///
    /// # Arguments
    /// - `user_id` - Internal id of the punished user
    /// - `ticket_type` - Restrict to tickets of this type, if given
    ///
    /// # Returns
    /// - `Ok(Vec<TicketReference>)` - Kind, channel, and log message per action
    /// - `Err(AppError)` - Database error, or a corrupt stored kind
    pub async fn active_ticket_references(
        &self,
        user_id: i32,
        ticket_type: Option<&str>,
    ) -> Result<Vec<TicketReference>, AppError> {
        let mut query = entity::prelude::PunishmentAction::find()
            .select_only()
            .column(entity::punishment_action::Column::Kind)
            .column_as(entity::ticket::Column::ChannelId, "channel_id")
            .column_as(entity::ticket::Column::LogMessageId, "log_message_id")
            .join(
                JoinType::InnerJoin,
                entity::punishment_action::Relation::Ticket.def(),
            )
            .filter(entity::punishment_action::Column::UserId.eq(user_id))
            .filter(entity::punishment_action::Column::IsActive.eq(true))
            .order_by_desc(entity::punishment_action::Column::CreatedAt)
            .order_by_desc(entity::punishment_action::Column::Id);

        if let Some(ticket_type) = ticket_type {
            query = query.filter(entity::ticket::Column::TicketType.eq(ticket_type));
        }

        let rows = query.into_model::<TicketReferenceRow>().all(self.db).await?;

        rows.into_iter()
            .map(|row| {
                let kind =
                    ActionKind::parse(&row.kind).ok_or(InternalError::UnknownActionKind {
                        value: row.kind.clone(),
                    })?;
                Ok(TicketReference {
                    kind,
                    channel_id: row.channel_id,
                    log_message_id: row.log_message_id,
                })
            })
            .collect()
    }

    /// Latest announced action in a ticket, by log message reference.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - Log message id of the newest announced action
    /// - `Ok(None)` - No announced action references the ticket
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn latest_log_reference_for_ticket(
        &self,
        ticket_id: i32,
    ) -> Result<Option<String>, AppError> {
        let entity = entity::prelude::PunishmentAction::find()
            .filter(entity::punishment_action::Column::TicketId.eq(ticket_id))
            .filter(entity::punishment_action::Column::LogMessageId.is_not_null())
            .order_by_desc(entity::punishment_action::Column::CreatedAt)
            .order_by_desc(entity::punishment_action::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.and_then(|row| row.log_message_id))
    }

    /// All ledger rows targeting a user, newest first.
    pub async fn all_for_target(&self, user_id: i32) -> Result<Vec<PunishmentAction>, AppError> {
        let entities = entity::prelude::PunishmentAction::find()
            .filter(entity::punishment_action::Column::UserId.eq(user_id))
            .order_by_desc(entity::punishment_action::Column::CreatedAt)
            .order_by_desc(entity::punishment_action::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(PunishmentAction::from_entity).collect()
    }

    /// All ledger rows a user performed as staff, newest first.
    pub async fn all_by_performer(&self, user_id: i32) -> Result<Vec<PunishmentAction>, AppError> {
        let entities = entity::prelude::PunishmentAction::find()
            .filter(entity::punishment_action::Column::PerformedBy.eq(user_id))
            .order_by_desc(entity::punishment_action::Column::CreatedAt)
            .order_by_desc(entity::punishment_action::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(PunishmentAction::from_entity).collect()
    }
}
