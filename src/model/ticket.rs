//! Ticket domain models and parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{internal::InternalError, AppError},
    util::time::parse_timestamp,
};

/// Lifecycle state of a support conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    /// Storage representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    /// Parses a stored status value.
    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            other => Err(InternalError::UnknownTicketStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// A support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Internal ticket id.
    pub id: i32,
    /// Internal id of the opener.
    pub user_id: i32,
    /// External channel identifier of the conversation.
    pub channel_id: String,
    /// External id of the archive log message, present once closed.
    pub log_message_id: Option<String>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    /// Free-form ticket category, e.g. `Discord-Complaint`.
    pub ticket_type: Option<String>,
    /// Free-text offender reference, used to cross-reference game-side complaints.
    pub offender_identifier: Option<String>,
}

impl Ticket {
    /// Converts an entity model to a ticket domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The converted ticket
    /// - `Err(AppError::InternalErr)` - Stored status or timestamp is corrupt
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            channel_id: entity.channel_id,
            log_message_id: entity.log_message_id,
            status: TicketStatus::parse(&entity.status)?,
            created_at: parse_timestamp(&entity.created_at)?,
            ticket_type: entity.ticket_type,
            offender_identifier: entity.offender_identifier,
        })
    }
}

/// Identifies a ticket either by its external channel or its internal id.
///
/// Close commands arrive from the channel being archived, while automated
/// cleanups work from internal ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketRef {
    /// External channel identifier.
    Channel(String),
    /// Internal ticket id.
    Id(i32),
}

/// Parameters for opening a ticket.
#[derive(Debug, Clone)]
pub struct OpenTicketParam {
    /// Discord id of the user opening the ticket.
    pub opener_discord_id: String,
    /// External channel identifier of the new conversation.
    pub channel_id: String,
    /// Free-form ticket category.
    pub ticket_type: Option<String>,
    /// Offender named in the complaint, if any.
    pub offender_identifier: Option<String>,
}
