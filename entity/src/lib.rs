//! SeaORM entity models for the tribunal moderation schema.
//!
//! These models mirror the database tables one-to-one. Application code converts
//! them into domain models at the repository boundary and never exposes them
//! further up the stack.

pub mod prelude;

pub mod punishment_action;
pub mod ticket;
pub mod user;
