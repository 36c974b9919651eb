//! Moderation core for a cross-platform (Discord + Mindustry) community bot.
//!
//! `tribunal` is consumed as an in-process library by the bot's command layer.
//! It owns the punishment ledger and the policies around it:
//!
//! - identity resolution of `(platform, external id)` pairs into durable
//!   internal user ids ([`service::identity`]),
//! - recording punishments with stacking and warn-escalation semantics
//!   ([`service::moderation`]),
//! - promotion/demotion history ([`service::roles`]),
//! - ticket lifecycle and ticket/punishment linkage ([`service::ticket`]).
//!
//! The command layer performs external side effects (role grants, guild bans)
//! only after the corresponding ledger write has been confirmed, and undoes
//! them after a confirmed revocation.

pub mod clock;
pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod model;
pub mod service;
pub mod util;

pub use clock::{Clock, SystemClock};
pub use config::{Config, ModerationConfig};
pub use error::AppError;
pub use model::punishment::{ActionKind, ActivePunishment, PunishOutcome};
pub use model::user::Platform;
pub use service::{
    identity::IdentityService, moderation::ModerationService, roles::RoleService,
    ticket::TicketService,
};
