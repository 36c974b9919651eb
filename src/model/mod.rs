//! Domain models and parameter types.
//!
//! Typed records for every entity, constructed from SeaORM models at the
//! repository boundary so the layers above never see raw rows, plus the
//! parameter and outcome types the services speak.

pub mod punishment;
pub mod ticket;
pub mod user;
