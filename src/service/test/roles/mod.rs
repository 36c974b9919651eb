use crate::{
    clock::FixedClock,
    error::AppError,
    model::user::Platform,
    service::roles::{RoleChangeParam, RoleService},
};
use chrono::{DateTime, TimeZone, Utc};
use test_utils::builder::TestBuilder;


/// Fixed instant used as "now" across the role service tests.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}
