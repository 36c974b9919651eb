//! User identity models.
//!
//! A user is an internal identity that may be linked to a Discord account, a
//! Mindustry account, or both. Rows are created lazily on first sight of either
//! external id and are never deleted by the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{validation::ValidationError, AppError},
    model::punishment::PunishmentAction,
    util::time::parse_timestamp,
};

/// External identity namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Discord,
    Mindustry,
}

impl Platform {
    /// Parses a platform string from the command layer.
    ///
    /// # Returns
    /// - `Ok(Platform)` - Recognized platform
    /// - `Err(ValidationError::UnsupportedPlatform)` - Anything else
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "discord" => Ok(Self::Discord),
            "mindustry" => Ok(Self::Mindustry),
            other => Err(ValidationError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Storage/display name of the platform.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::Mindustry => "mindustry",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal user identity linking both platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal surrogate key.
    pub id: i32,
    /// Discord account id, if this identity has been seen on Discord.
    pub discord_id: Option<String>,
    /// Mindustry account id, if this identity has been seen in-game.
    pub mindustry_id: Option<String>,
    /// When the identity was first created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseTimestamp))` - Stored creation timestamp
    ///   is corrupt
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            discord_id: entity.discord_id,
            mindustry_id: entity.mindustry_id,
            created_at: parse_timestamp(&entity.created_at)?,
        })
    }
}

/// Full disciplinary profile of a user.
///
/// Everything the ledger knows about one identity: the actions taken against
/// them and the actions they performed as staff. Used by the command layer to
/// render profile embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The identity itself.
    pub user: User,
    /// Ledger rows targeting this user, newest first.
    pub received: Vec<PunishmentAction>,
    /// Ledger rows this user performed, newest first.
    pub performed: Vec<PunishmentAction>,
}
