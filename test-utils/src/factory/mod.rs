//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories automatically handle dependencies and foreign
//! key relationships, making tests more concise and maintainable.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!     let ticket = factory::ticket::create_ticket(&db, user.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(&db)
//!     .mindustry_id("Sharded")
//!     .build()
//!     .await?;
//!
//! let warn = factory::punishment::PunishmentFactory::new(&db, user.id, staff.id)
//!     .kind("warn")
//!     .reason("spam")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user identity entities
//! - `ticket` - Create ticket entities
//! - `punishment` - Create punishment ledger entities
//! - `helpers` - Shared id generation and multi-entity conveniences

pub mod helpers;
pub mod punishment;
pub mod ticket;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use punishment::create_punishment;
pub use ticket::create_ticket;
pub use user::create_user;
