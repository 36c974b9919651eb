//! Ticket service.
//!
//! Bounds the ticket lifecycle and exposes the linkage queries the command
//! layer uses to keep one disciplinary outcome per complaint and to
//! cross-reference archived game-side complaints.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    clock::Clock,
    data::{punishment::PunishmentRepository, ticket::TicketRepository, user::UserRepository},
    error::AppError,
    model::{
        ticket::{OpenTicketParam, Ticket, TicketRef},
        user::Platform,
    },
    util::time::to_storage_precision,
};

/// Service providing ticket lifecycle and linkage operations.
pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
}

impl<'a> TicketService<'a> {
    /// Creates a new TicketService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `clock` - Source of the current instant
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Opens a ticket for a support channel.
    ///
    /// Resolves the opener in the Discord namespace, creating the identity on
    /// first sight, then inserts the OPEN ticket row. Both writes share one
    /// transaction.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket
    /// - `Err(AppError::DbErr)` - Database error, including a duplicate channel
    pub async fn open_ticket(&self, param: OpenTicketParam) -> Result<Ticket, AppError> {
        let now = to_storage_precision(self.clock.now());
        let txn = self.db.begin().await?;

        let opener = UserRepository::new(&txn)
            .resolve(Platform::Discord, &param.opener_discord_id, now)
            .await?;

        let ticket = TicketRepository::new(&txn)
            .open(
                opener,
                &param.channel_id,
                param.ticket_type.as_deref(),
                param.offender_identifier.as_deref(),
                now,
            )
            .await?;

        txn.commit().await?;
        Ok(ticket)
    }

    /// Closes a ticket and attaches the archive log message reference.
    ///
    /// # Returns
    /// - `Ok(true)` - Ticket closed
    /// - `Ok(false)` - No matching ticket
    pub async fn close_ticket(
        &self,
        ticket: &TicketRef,
        log_message_id: &str,
    ) -> Result<bool, AppError> {
        TicketRepository::new(self.db)
            .close(ticket, log_message_id)
            .await
    }

    /// Whether any ledger row references the ticket.
    ///
    /// The command layer refuses a second punishment inside the same ticket
    /// when this returns true.
    pub async fn has_punishment(&self, ticket_id: i32) -> Result<bool, AppError> {
        PunishmentRepository::new(self.db)
            .ticket_has_punishment(ticket_id)
            .await
    }

    /// Internal id of the ticket bound to a channel, if any.
    pub async fn ticket_id_for_channel(&self, channel_id: &str) -> Result<Option<i32>, AppError> {
        TicketRepository::new(self.db)
            .find_id_by_channel(channel_id)
            .await
    }

    /// Log message of the latest announced punishment in a ticket.
    pub async fn punishment_log_reference(
        &self,
        ticket_id: i32,
    ) -> Result<Option<String>, AppError> {
        PunishmentRepository::new(self.db)
            .latest_log_reference_for_ticket(ticket_id)
            .await
    }

    /// Log message ids of closed complaints of a type naming an offender.
    ///
    /// Used when a later appeal references the same in-game name as earlier
    /// archived complaints.
    pub async fn closed_complaint_logs(
        &self,
        ticket_type: &str,
        offender_identifier: &str,
    ) -> Result<Vec<String>, AppError> {
        TicketRepository::new(self.db)
            .closed_complaint_logs(ticket_type, offender_identifier)
            .await
    }
}
