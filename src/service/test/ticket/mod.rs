use crate::{
    clock::FixedClock,
    error::AppError,
    model::ticket::{OpenTicketParam, TicketRef, TicketStatus},
    service::ticket::TicketService,
};
use chrono::{DateTime, TimeZone, Utc};
use test_utils::{builder::TestBuilder, factory};

mod linkage;

/// Fixed instant used as "now" across the ticket service tests.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Open-ticket parameters for a Discord complaint in the given channel.
fn open_param(channel_id: &str) -> OpenTicketParam {
    OpenTicketParam {
        opener_discord_id: "3000".to_string(),
        channel_id: channel_id.to_string(),
        ticket_type: Some("Discord-Complaint".to_string()),
        offender_identifier: None,
    }
}
