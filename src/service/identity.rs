//! Identity service.
//!
//! Thin orchestration over the identity resolver, plus the full disciplinary
//! profile lookup the command layer renders as a profile embed.

use sea_orm::DatabaseConnection;

use crate::{
    clock::Clock,
    data::{punishment::PunishmentRepository, user::UserRepository},
    error::AppError,
    model::user::{Platform, UserProfile},
    util::time::to_storage_precision,
};

/// Service providing identity resolution across platforms.
pub struct IdentityService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
}

impl<'a> IdentityService<'a> {
    /// Creates a new IdentityService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `clock` - Source of the current instant
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Resolves an external id to an internal user id, creating on first sight.
    ///
    /// Idempotent: repeated calls for the same pair return the same id, also
    /// under concurrent callers.
    ///
    /// # Returns
    /// - `Ok(i32)` - Internal id of the user
    /// - `Err(AppError::DbErr)` - Database error during lookup or insert
    pub async fn resolve(&self, platform: Platform, external_id: &str) -> Result<i32, AppError> {
        let now = to_storage_precision(self.clock.now());
        UserRepository::new(self.db)
            .resolve(platform, external_id, now)
            .await
    }

    /// Looks up an internal id without creating anything.
    ///
    /// # Returns
    /// - `Ok(Some(i32))` - The pair is known
    /// - `Ok(None)` - Never seen
    pub async fn lookup(&self, platform: Platform, external_id: &str) -> Result<Option<i32>, AppError> {
        UserRepository::new(self.db)
            .find_internal_id(platform, external_id)
            .await
    }

    /// Full disciplinary profile of an external id.
    ///
    /// # Returns
    /// - `Ok(Some(UserProfile))` - The identity with everything it received and
    ///   performed, newest first
    /// - `Ok(None)` - The pair has never been seen
    /// - `Err(AppError)` - Database error, or a corrupt stored row
    pub async fn profile(
        &self,
        platform: Platform,
        external_id: &str,
    ) -> Result<Option<UserProfile>, AppError> {
        let users = UserRepository::new(self.db);
        let Some(internal_id) = users.find_internal_id(platform, external_id).await? else {
            return Ok(None);
        };
        let Some(user) = users.find_by_id(internal_id).await? else {
            return Ok(None);
        };

        let ledger = PunishmentRepository::new(self.db);
        let received = ledger.all_for_target(internal_id).await?;
        let performed = ledger.all_by_performer(internal_id).await?;

        Ok(Some(UserProfile {
            user,
            received,
            performed,
        }))
    }
}
