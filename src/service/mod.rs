//! Business logic layer.
//!
//! Services orchestrate repositories and enforce the moderation policies:
//! identity resolution, punishment stacking and warn escalation, role change
//! history, and the ticket lifecycle. Side effects on the chat platform are the
//! caller's responsibility and happen only after a service call confirms the
//! ledger write.

pub mod identity;
pub mod moderation;
pub mod roles;
pub mod ticket;
