//! Application configuration.
//!
//! Configuration is loaded once at startup and passed explicitly into service
//! constructors; there is no global configuration state.

use crate::{
    error::{config::ConfigError, AppError},
    model::punishment::ActionKind,
};

/// Seven days, the default length of the automatic escalation punishment.
const DEFAULT_ESCALATION_SECONDS: i64 = 7 * 86400;

/// Active warns a user may accumulate before escalation triggers.
const DEFAULT_WARN_THRESHOLD: u64 = 3;

/// Top-level application configuration.
pub struct Config {
    pub database_url: String,
    pub moderation: ModerationConfig,
}

/// Tunables of the warn-escalation policy.
///
/// Constructed from the environment at startup or directly in tests, and handed
/// to [`crate::service::moderation::ModerationService`] by reference.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// Active warns required to trigger the automatic punishment.
    pub warn_threshold: u64,
    /// Kind of the automatic punishment. Must be a stackable kind.
    pub escalation_kind: ActionKind,
    /// Length of the automatic punishment.
    pub escalation_duration_seconds: i64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            warn_threshold: DEFAULT_WARN_THRESHOLD,
            escalation_kind: ActionKind::Mute,
            escalation_duration_seconds: DEFAULT_ESCALATION_SECONDS,
        }
    }
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// `DATABASE_URL` is required. The escalation settings fall back to their
    /// defaults (3 warns, 7-day mute) when unset:
    /// - `WARNS_UNTIL_ACTION` - warn threshold
    /// - `ACTION_ON_WARN_LIMIT` - escalation kind (`mute` or `ban`)
    /// - `ACTION_ON_WARN_DURATION_SECONDS` - escalation length
    ///
    /// # Returns
    /// - `Ok(Config)` - Parsed configuration
    /// - `Err(AppError::ConfigErr)` - Missing `DATABASE_URL`, or an escalation
    ///   variable that does not parse (including a non-stackable escalation kind)
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let warn_threshold = match std::env::var("WARNS_UNTIL_ACTION") {
            Ok(value) => value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
                name: "WARNS_UNTIL_ACTION".to_string(),
                value,
            })?,
            Err(_) => DEFAULT_WARN_THRESHOLD,
        };

        let escalation_kind = match std::env::var("ACTION_ON_WARN_LIMIT") {
            Ok(value) => ActionKind::parse(&value)
                .filter(|kind| kind.is_stackable())
                .ok_or(ConfigError::InvalidEnvVar {
                    name: "ACTION_ON_WARN_LIMIT".to_string(),
                    value,
                })?,
            Err(_) => ActionKind::Mute,
        };

        let escalation_duration_seconds = match std::env::var("ACTION_ON_WARN_DURATION_SECONDS") {
            Ok(value) => value.parse::<i64>().map_err(|_| ConfigError::InvalidEnvVar {
                name: "ACTION_ON_WARN_DURATION_SECONDS".to_string(),
                value,
            })?,
            Err(_) => DEFAULT_ESCALATION_SECONDS,
        };

        Ok(Self {
            database_url,
            moderation: ModerationConfig {
                warn_threshold,
                escalation_kind,
                escalation_duration_seconds,
            },
        })
    }
}
