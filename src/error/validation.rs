use thiserror::Error;

use crate::model::punishment::ActionKind;

/// Input rejected before any write was applied.
///
/// Validation errors are raised synchronously to the immediate caller and are
/// never partially applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Platform string outside the supported set.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// A kind that must expire was submitted without a duration.
    #[error("Action kind {0} requires a duration")]
    MissingDuration(ActionKind),

    /// Promotion/demotion submitted through the punishment path.
    #[error("Action kind {0} is a role change, not a punishment")]
    RoleChangeKind(ActionKind),

    /// Revocation requested for a kind that has no revocation semantics.
    #[error("Action kind {0} cannot be revoked")]
    NotRevocable(ActionKind),
}
