//! User identity repository.
//!
//! Implements the identity resolver: mapping `(platform, external id)` pairs to
//! durable internal user ids, creating a row on first sight. Creation-on-demand
//! is intended behavior; no error is raised for a previously unseen id.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, SqlErr,
};

use crate::{
    error::AppError,
    model::user::{Platform, User},
    util::time::format_timestamp,
};

/// Repository providing database operations for user identities.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Connection or open transaction to operate on
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Resolves an external id to an internal user id, creating the row on first sight.
    ///
    /// Looks up the user by the platform-specific column; if no row exists, inserts
    /// one with only that platform's external id populated. Concurrent calls for the
    /// same pair cannot create duplicates: the unique constraint rejects the loser,
    /// which then re-queries and returns the winner's id.
    ///
    /// # Arguments
    /// - `platform` - Namespace of the external id
    /// - `external_id` - Stable external identifier on that platform
    /// - `now` - Creation timestamp for a newly inserted row
    ///
    /// # Returns
    /// - `Ok(i32)` - Internal id of the existing or newly created user
    /// - `Err(AppError::DbErr)` - Database error during lookup or insert
    pub async fn resolve(
        &self,
        platform: Platform,
        external_id: &str,
        now: DateTime<Utc>,
    ) -> Result<i32, AppError> {
        if let Some(id) = self.find_internal_id(platform, external_id).await? {
            return Ok(id);
        }

        let mut row = entity::user::ActiveModel {
            created_at: ActiveValue::Set(format_timestamp(now)),
            ..Default::default()
        };
        match platform {
            Platform::Discord => {
                row.discord_id = ActiveValue::Set(Some(external_id.to_string()));
            }
            Platform::Mindustry => {
                row.mindustry_id = ActiveValue::Set(Some(external_id.to_string()));
            }
        }

        match row.insert(self.db).await {
            Ok(user) => {
                tracing::info!(
                    platform = platform.as_str(),
                    external_id,
                    internal_id = user.id,
                    "created new user"
                );
                Ok(user.id)
            }
            // Lost a race against a concurrent insert of the same pair; the
            // winner's row satisfies this call.
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                match self.find_internal_id(platform, external_id).await? {
                    Some(id) => Ok(id),
                    None => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Looks up the internal id for an external id without creating anything.
    ///
    /// # Returns
    /// - `Ok(Some(i32))` - The user exists on that platform
    /// - `Ok(None)` - The pair has never been seen
    /// - `Err(AppError::DbErr)` - Database error during lookup
    pub async fn find_internal_id(
        &self,
        platform: Platform,
        external_id: &str,
    ) -> Result<Option<i32>, AppError> {
        let entity = entity::prelude::User::find()
            .filter(Self::platform_column(platform).eq(external_id))
            .one(self.db)
            .await?;

        Ok(entity.map(|user| user.id))
    }

    /// Finds a user by internal id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError)` - Database error, or a corrupt stored timestamp
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        entity.map(User::from_entity).transpose()
    }

    fn platform_column(platform: Platform) -> entity::user::Column {
        match platform {
            Platform::Discord => entity::user::Column::DiscordId,
            Platform::Mindustry => entity::user::Column::MindustryId,
        }
    }
}
