pub use super::punishment_action::Entity as PunishmentAction;
pub use super::ticket::Entity as Ticket;
pub use super::user::Entity as User;
