//! Ticket repository.
//!
//! Tickets bound support conversations: a row is created when a channel is
//! opened and flipped to CLOSED (with the archive log message attached) when
//! the conversation is archived. Rows are never physically deleted.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QuerySelect,
};

use crate::{
    error::AppError,
    model::ticket::{Ticket, TicketRef, TicketStatus},
    util::time::format_timestamp,
};

/// Repository providing database operations for tickets.
pub struct TicketRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TicketRepository<'a, C> {
    /// Creates a new TicketRepository instance.
    ///
    /// # Arguments
    /// - `db` - Connection or open transaction to operate on
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new OPEN ticket.
    ///
    /// # Arguments
    /// - `user_id` - Internal id of the opener
    /// - `channel_id` - External channel identifier (unique per ticket)
    /// - `ticket_type` - Free-form category, e.g. `Discord-Complaint`
    /// - `offender_identifier` - Offender named in the complaint, if any
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket
    /// - `Err(AppError::DbErr)` - Database error, including a duplicate channel id
    pub async fn open(
        &self,
        user_id: i32,
        channel_id: &str,
        ticket_type: Option<&str>,
        offender_identifier: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Ticket, AppError> {
        let entity = entity::ticket::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            channel_id: ActiveValue::Set(channel_id.to_string()),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            created_at: ActiveValue::Set(format_timestamp(now)),
            ticket_type: ActiveValue::Set(ticket_type.map(str::to_string)),
            offender_identifier: ActiveValue::Set(offender_identifier.map(str::to_string)),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        tracing::info!(
            ticket_id = entity.id,
            channel_id,
            ticket_type,
            offender_identifier,
            "opened ticket"
        );

        Ticket::from_entity(entity)
    }

    /// Closes a ticket and attaches the archive log message.
    ///
    /// # Arguments
    /// - `ticket` - The ticket, by external channel or internal id
    /// - `log_message_id` - External id of the archive log message
    ///
    /// # Returns
    /// - `Ok(true)` - Ticket closed
    /// - `Ok(false)` - No matching ticket exists
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn close(&self, ticket: &TicketRef, log_message_id: &str) -> Result<bool, AppError> {
        let mut update = entity::prelude::Ticket::update_many()
            .col_expr(
                entity::ticket::Column::Status,
                Expr::value(TicketStatus::Closed.as_str()),
            )
            .col_expr(
                entity::ticket::Column::LogMessageId,
                Expr::value(log_message_id),
            );

        update = match ticket {
            TicketRef::Channel(channel_id) => {
                update.filter(entity::ticket::Column::ChannelId.eq(channel_id.as_str()))
            }
            TicketRef::Id(id) => update.filter(entity::ticket::Column::Id.eq(*id)),
        };

        let result = update.exec(self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(?ticket, log_message_id, "closed ticket");
        } else {
            tracing::warn!(?ticket, "attempted to close unknown ticket");
        }

        Ok(result.rows_affected > 0)
    }

    /// Finds a ticket by its external channel identifier.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - Ticket found
    /// - `Ok(None)` - No ticket for that channel
    /// - `Err(AppError)` - Database error, or a corrupt stored row
    pub async fn find_by_channel(&self, channel_id: &str) -> Result<Option<Ticket>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Internal id of the ticket bound to a channel, if any.
    pub async fn find_id_by_channel(&self, channel_id: &str) -> Result<Option<i32>, AppError> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id))
            .one(self.db)
            .await?;

        Ok(entity.map(|ticket| ticket.id))
    }

    /// Log message ids of closed complaints naming an offender.
    ///
    /// Supports cross-referencing: when a later appeal mentions the same
    /// in-game name, the command layer links back to the archived complaints.
    /// Only closed tickets with an attached log message qualify.
    ///
    /// # Arguments
    /// - `ticket_type` - Complaint category to search, e.g. `Mindustry-Complaint`
    /// - `offender_identifier` - The offender reference recorded at open time
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Log message ids, possibly empty
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn closed_complaint_logs(
        &self,
        ticket_type: &str,
        offender_identifier: &str,
    ) -> Result<Vec<String>, AppError> {
        let rows: Vec<Option<String>> = entity::prelude::Ticket::find()
            .select_only()
            .column(entity::ticket::Column::LogMessageId)
            .filter(entity::ticket::Column::TicketType.eq(ticket_type))
            .filter(entity::ticket::Column::OffenderIdentifier.eq(offender_identifier))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Closed.as_str()))
            .filter(entity::ticket::Column::LogMessageId.is_not_null())
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().flatten().collect())
    }
}
