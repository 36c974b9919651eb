//! Ticket factory for creating test tickets.

use crate::factory::helpers::{next_id, DEFAULT_CREATED_AT};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::ticket::TicketFactory;
///
/// let ticket = TicketFactory::new(&db, user.id)
///     .ticket_type("Mindustry-Complaint")
///     .offender_identifier("Sharded")
///     .closed("555000111")
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    channel_id: String,
    log_message_id: Option<String>,
    status: String,
    created_at: String,
    ticket_type: Option<String>,
    offender_identifier: Option<String>,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - channel_id: auto-incremented numeric string
    /// - status: `OPEN`, no log message
    /// - ticket_type / offender_identifier: unset
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `user_id` - Internal id of the opening user
    ///
    /// # Returns
    /// - `TicketFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            channel_id: format!("{}", 900_000_000 + id),
            log_message_id: None,
            status: "OPEN".to_string(),
            created_at: DEFAULT_CREATED_AT.to_string(),
            ticket_type: None,
            offender_identifier: None,
        }
    }

    /// Sets the external channel identifier.
    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Sets the ticket type.
    pub fn ticket_type(mut self, ticket_type: impl Into<String>) -> Self {
        self.ticket_type = Some(ticket_type.into());
        self
    }

    /// Sets the offender identifier recorded at open time.
    pub fn offender_identifier(mut self, offender_identifier: impl Into<String>) -> Self {
        self.offender_identifier = Some(offender_identifier.into());
        self
    }

    /// Marks the ticket CLOSED with the given archive log message.
    pub fn closed(mut self, log_message_id: impl Into<String>) -> Self {
        self.status = "CLOSED".to_string();
        self.log_message_id = Some(log_message_id.into());
        self
    }

    /// Builds and inserts the ticket entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::ticket::Model)` - Created ticket entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            channel_id: ActiveValue::Set(self.channel_id),
            log_message_id: ActiveValue::Set(self.log_message_id),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(self.created_at),
            ticket_type: ActiveValue::Set(self.ticket_type),
            offender_identifier: ActiveValue::Set(self.offender_identifier),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket with default values.
///
/// Shorthand for `TicketFactory::new(db, user_id).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Internal id of the opening user
///
/// # Returns
/// - `Ok(entity::ticket::Model)` - Created ticket entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_ticket(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, user_id).build().await
}
