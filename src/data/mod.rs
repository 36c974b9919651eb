//! Database repository layer for all domain entities.
//!
//! Repositories handle database operations for each domain. They use SeaORM entity
//! models internally and return domain models to maintain separation between the data
//! layer and business logic layer. Repositories are generic over the connection so
//! services can run multi-step sequences (read-decide-write) inside a single
//! transaction.

pub mod punishment;
pub mod ticket;
pub mod user;
