//! Punishment ledger factory for creating test ledger rows.

use crate::factory::helpers::DEFAULT_CREATED_AT;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test punishment rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::punishment::PunishmentFactory;
///
/// let ban = PunishmentFactory::new(&db, user.id, staff.id)
///     .kind("ban")
///     .duration(86400, "2024-01-02 00:00:00")
///     .ticket_id(ticket.id)
///     .build()
///     .await?;
/// ```
pub struct PunishmentFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    performed_by: i32,
    kind: String,
    ticket_id: Option<i32>,
    log_message_id: Option<String>,
    role: Option<String>,
    reason: Option<String>,
    created_at: String,
    duration_seconds: Option<i64>,
    expires_at: Option<String>,
    is_active: bool,
}

impl<'a> PunishmentFactory<'a> {
    /// Creates a new PunishmentFactory with default values.
    ///
    /// Defaults:
    /// - kind: `warn`
    /// - active, permanent (no duration/expiry), no ticket, no reason
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `user_id` - Internal id of the punished user
    /// - `performed_by` - Internal id of the issuing staff member
    ///
    /// # Returns
    /// - `PunishmentFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, user_id: i32, performed_by: i32) -> Self {
        Self {
            db,
            user_id,
            performed_by,
            kind: "warn".to_string(),
            ticket_id: None,
            log_message_id: None,
            role: None,
            reason: None,
            created_at: DEFAULT_CREATED_AT.to_string(),
            duration_seconds: None,
            expires_at: None,
            is_active: true,
        }
    }

    /// Sets the action kind (storage string, e.g. `mute`, `ban`).
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Links the row to a ticket.
    pub fn ticket_id(mut self, ticket_id: i32) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    /// Sets the announcement log message reference.
    pub fn log_message_id(mut self, log_message_id: impl Into<String>) -> Self {
        self.log_message_id = Some(log_message_id.into());
        self
    }

    /// Sets the role label (for promotions and demotions).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the reason text.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Makes the row timed with the given duration and expiry.
    ///
    /// # Arguments
    /// - `duration_seconds` - Punishment length
    /// - `expires_at` - Expiry timestamp string in storage format
    pub fn duration(mut self, duration_seconds: i64, expires_at: impl Into<String>) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self.expires_at = Some(expires_at.into());
        self
    }

    /// Marks the row inactive (superseded).
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Builds and inserts the punishment entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::punishment_action::Model)` - Created ledger row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::punishment_action::Model, DbErr> {
        entity::punishment_action::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            kind: ActiveValue::Set(self.kind),
            performed_by: ActiveValue::Set(self.performed_by),
            ticket_id: ActiveValue::Set(self.ticket_id),
            log_message_id: ActiveValue::Set(self.log_message_id),
            role: ActiveValue::Set(self.role),
            reason: ActiveValue::Set(self.reason),
            created_at: ActiveValue::Set(self.created_at),
            duration_seconds: ActiveValue::Set(self.duration_seconds),
            expires_at: ActiveValue::Set(self.expires_at),
            is_active: ActiveValue::Set(self.is_active),
            revoked_by: ActiveValue::Set(None),
            revocation_reason: ActiveValue::Set(None),
            revoked_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active warn with default values.
///
/// Shorthand for `PunishmentFactory::new(db, user_id, performed_by).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Internal id of the punished user
/// - `performed_by` - Internal id of the issuing staff member
///
/// # Returns
/// - `Ok(entity::punishment_action::Model)` - Created ledger row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_punishment(
    db: &DatabaseConnection,
    user_id: i32,
    performed_by: i32,
) -> Result<entity::punishment_action::Model, DbErr> {
    PunishmentFactory::new(db, user_id, performed_by).build().await
}
