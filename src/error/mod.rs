//! Error types for the moderation core.
//!
//! `AppError` is the top-level error the public services return. Domain-specific
//! errors live in submodules and convert via `#[from]`. Expected control-flow
//! outcomes (no active punishment to revoke, unknown ticket, stacking skips) are
//! modelled as `Ok` values, never as errors.

pub mod config;
pub mod internal;
pub mod validation;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, validation::ValidationError};

/// Top-level error type aggregating all failure modes of the core.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Invalid input rejected before anything was applied.
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// Corrupt stored data surfacing at the entity-to-model boundary.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    ///
    /// The core does not retry; the caller decides whether to re-run the whole
    /// operation from scratch. Identity creation is idempotent, so a retry is
    /// always safe.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}
