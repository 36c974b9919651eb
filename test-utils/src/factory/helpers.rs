//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Timestamp string all factories stamp rows with.
///
/// Matches the application's storage format (`YYYY-MM-DD HH:MM:SS`).
pub const DEFAULT_CREATED_AT: &str = "2024-01-01 00:00:00";

/// Creates a target user, a staff member, and a ticket opened by the target.
///
/// This is a convenience method for linkage tests that need the full chain:
/// 1. User (the offender)
/// 2. User (the staff member, Discord only)
/// 3. Ticket (opened for the offender)
///
/// All entities are created with default values. Use the individual
/// factories if you need to customize specific entities.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((offender, staff, ticket))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_ticket_with_participants(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::user::Model,
        entity::ticket::Model,
    ),
    DbErr,
> {
    let offender = crate::factory::user::create_user(db).await?;
    let staff = crate::factory::user::create_user(db).await?;
    let ticket = crate::factory::ticket::create_ticket(db, offender.id).await?;

    Ok((offender, staff, ticket))
}
