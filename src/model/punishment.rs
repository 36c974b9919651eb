//! Punishment ledger domain models, parameters, and outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{internal::InternalError, AppError},
    model::user::Platform,
    util::time::parse_timestamp,
};

/// The closed set of ledger action kinds.
///
/// Adding a kind is a compile-time-checked change: the ledger, stacking, and
/// escalation paths all match exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Promotion,
    Demotion,
    Mute,
    Ban,
    Warn,
    Kick,
    VoiceMute,
    Blacklist,
}

impl ActionKind {
    /// Storage/display name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Promotion => "promotion",
            Self::Demotion => "demotion",
            Self::Mute => "mute",
            Self::Ban => "ban",
            Self::Warn => "warn",
            Self::Kick => "kick",
            Self::VoiceMute => "voice_mute",
            Self::Blacklist => "blacklist",
        }
    }

    /// Parses a kind string, returning `None` for values outside the set.
    ///
    /// Callers wrap the `None` in the error appropriate to their boundary:
    /// a validation error for command input, an internal error for stored rows.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "promotion" => Some(Self::Promotion),
            "demotion" => Some(Self::Demotion),
            "mute" => Some(Self::Mute),
            "ban" => Some(Self::Ban),
            "warn" => Some(Self::Warn),
            "kick" => Some(Self::Kick),
            "voice_mute" => Some(Self::VoiceMute),
            "blacklist" => Some(Self::Blacklist),
            _ => None,
        }
    }

    /// Whether the stacking policy applies to this kind.
    ///
    /// Stackable kinds keep at most one active row per user; warns and kicks
    /// are recorded independently and never superseded.
    pub fn is_stackable(self) -> bool {
        matches!(self, Self::Mute | Self::Ban | Self::VoiceMute | Self::Blacklist)
    }

    /// Whether an active row of this kind can be explicitly revoked.
    pub fn is_revocable(self) -> bool {
        matches!(
            self,
            Self::Mute | Self::Ban | Self::VoiceMute | Self::Blacklist | Self::Warn
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunishmentAction {
    pub id: i32,
    /// Internal id of the punished user.
    pub user_id: i32,
    pub kind: ActionKind,
    /// Internal id of the issuing staff member.
    pub performed_by: i32,
    /// Ticket the action was issued in, if any.
    pub ticket_id: Option<i32>,
    /// External id of the public announcement message.
    pub log_message_id: Option<String>,
    /// Role label, for promotions and demotions.
    pub role: Option<String>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub duration_seconds: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    /// Internal id of the revoker; present only on audited revocations,
    /// never on silent supersessions.
    pub revoked_by: Option<i32>,
    pub revocation_reason: Option<String>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl PunishmentAction {
    /// Converts an entity model to a ledger domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(PunishmentAction)` - The converted row
    /// - `Err(AppError::InternalErr)` - Stored kind or a timestamp is corrupt
    pub fn from_entity(entity: entity::punishment_action::Model) -> Result<Self, AppError> {
        let kind = ActionKind::parse(&entity.kind).ok_or(InternalError::UnknownActionKind {
            value: entity.kind.clone(),
        })?;

        let expires_at = entity
            .expires_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;
        let revoked_at = entity
            .revoked_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            kind,
            performed_by: entity.performed_by,
            ticket_id: entity.ticket_id,
            log_message_id: entity.log_message_id,
            role: entity.role,
            reason: entity.reason,
            created_at: parse_timestamp(&entity.created_at)?,
            duration_seconds: entity.duration_seconds,
            expires_at,
            is_active: entity.is_active,
            revoked_by: entity.revoked_by,
            revocation_reason: entity.revocation_reason,
            revoked_at,
        })
    }
}

/// The active punishment of one kind for one user.
///
/// What downstream unmute/unban schedulers need: which row is live and when it
/// runs out. `expires_at` of `None` means the punishment is permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePunishment {
    /// Ledger row id.
    pub id: i32,
    /// Expiry instant, or `None` for a permanent punishment.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ActivePunishment {
    /// Converts an entity model, parsing the stored expiry if present.
    pub fn from_entity(entity: entity::punishment_action::Model) -> Result<Self, AppError> {
        let expires_at = entity
            .expires_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(Self {
            id: entity.id,
            expires_at,
        })
    }
}

/// Repository-level parameters for inserting a ledger row.
///
/// Services compute expiry instants before handing over; the repository only
/// formats and writes.
#[derive(Debug, Clone)]
pub struct NewActionParam {
    pub user_id: i32,
    pub performed_by: i32,
    pub kind: ActionKind,
    pub ticket_id: Option<i32>,
    pub role: Option<String>,
    pub reason: Option<String>,
    pub duration_seconds: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Parameters for issuing a punishment through the moderation service.
#[derive(Debug, Clone)]
pub struct PunishParam {
    /// Namespace of the target's external id.
    pub platform: Platform,
    /// External id of the punished user.
    pub target_id: String,
    /// Discord id of the issuing staff member.
    pub performer_id: String,
    pub kind: ActionKind,
    pub reason: Option<String>,
    /// Length of the punishment; `None` records a permanent action for
    /// stackable kinds. Warns always require a duration.
    pub duration_seconds: Option<i64>,
    /// Ticket the punishment is issued in, if any.
    pub ticket_id: Option<i32>,
}

/// Outcome of a punishment command, rendered by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PunishOutcome {
    /// The action was recorded; side effects may now be applied.
    Added {
        /// Id of the new ledger row.
        action_id: i32,
    },
    /// An active punishment with at least as much coverage already exists;
    /// nothing was written.
    Skipped,
    /// A warn was recorded without reaching the escalation threshold.
    Warned {
        /// Id of the new warn row.
        action_id: i32,
    },
    /// A warn was recorded, the threshold was reached, all active warns were
    /// swept, and an automatic punishment was issued.
    WarnedAndEscalated {
        /// Id of the new warn row.
        warn_id: i32,
        /// Id of the automatic punishment, or `None` when an existing active
        /// punishment already outlasted the configured escalation.
        escalation_id: Option<i32>,
        /// Kind of the automatic punishment.
        escalation_kind: ActionKind,
    },
}

/// Parameters for revoking an active punishment.
#[derive(Debug, Clone)]
pub struct RevokeParam {
    /// Namespace of the target's external id.
    pub platform: Platform,
    /// External id of the punished user.
    pub target_id: String,
    /// Discord id of the revoking staff member.
    pub revoker_id: String,
    pub kind: ActionKind,
    pub reason: String,
}

/// An active action joined to the ticket it was issued in.
///
/// Backs the "where was this user punished" lookups the command layer uses to
/// link appeal conversations back to the original complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketReference {
    pub kind: ActionKind,
    /// Channel of the originating ticket.
    pub channel_id: String,
    /// Log message of the originating ticket, if it was archived.
    pub log_message_id: Option<String>,
}
