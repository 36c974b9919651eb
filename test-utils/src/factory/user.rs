//! User factory for creating test user identities.
//!
//! This module provides factory methods for creating user entities with sensible
//! defaults, reducing boilerplate in tests. The factory supports customization
//! through a builder pattern.

use crate::factory::helpers::{next_id, DEFAULT_CREATED_AT};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// Provides a builder pattern for creating user entities with default values
/// that can be overridden as needed for specific test scenarios.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .discord_id("123456789")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: Option<String>,
    mindustry_id: Option<String>,
    created_at: String,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: auto-incremented numeric string
    /// - mindustry_id: unset
    /// - created_at: [`DEFAULT_CREATED_AT`]
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `UserFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: Some(format!("{}", 100_000_000 + id)),
            mindustry_id: None,
            created_at: DEFAULT_CREATED_AT.to_string(),
        }
    }

    /// Sets the Discord ID for the user.
    ///
    /// # Arguments
    /// - `discord_id` - Discord user ID as string
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = Some(discord_id.into());
        self
    }

    /// Sets the Mindustry ID for the user and clears the default Discord ID.
    ///
    /// Use `.discord_id(...)` afterwards to create a linked identity with both.
    ///
    /// # Arguments
    /// - `mindustry_id` - Mindustry player ID as string
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn mindustry_id(mut self, mindustry_id: impl Into<String>) -> Self {
        self.mindustry_id = Some(mindustry_id.into());
        self.discord_id = None;
        self
    }

    /// Sets the creation timestamp for the user.
    ///
    /// # Arguments
    /// - `created_at` - Timestamp string in storage format
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            mindustry_id: ActiveValue::Set(self.mindustry_id),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::user::Model)` - Created user entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}
