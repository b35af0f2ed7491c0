//! Interval-based due-date computation, shared by watering and fertilizing.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use verdant_db::models::CareEvent;

/// Care-event type strings the engine matches on. Events are lowercased at
/// the input boundary, so comparisons here are exact.
pub const WATERING: &str = "watering";
pub const FERTILIZING: &str = "fertilizing";
pub const SPRAY: &str = "spray";
pub const TREATMENT: &str = "treatment";

/// Where the next due date for an interval-based action falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    /// The date the action next becomes required.
    pub next: NaiveDate,
    /// The action is due today or overdue.
    pub due: bool,
    /// The action becomes due tomorrow.
    pub due_soon: bool,
}

/// The most recent event of the given care type, by event date.
pub fn last_event_date(events: &[CareEvent], care_type: &str) -> Option<NaiveDate> {
    events
        .iter()
        .filter(|e| e.care_type == care_type)
        .map(|e| e.date)
        .max()
}

/// Compute the next due date for an interval-based care action.
///
/// The anchor is the last matching event, else the planting date, else
/// "due immediately" (next = today).
pub fn next_due(
    last: Option<NaiveDate>,
    planting_date: Option<NaiveDate>,
    interval_days: i64,
    today: NaiveDate,
) -> DueStatus {
    let next = match last.or(planting_date) {
        Some(anchor) => anchor
            .checked_add_days(Days::new(interval_days as u64))
            .unwrap_or(anchor),
        None => today,
    };

    DueStatus {
        next,
        due: next <= today,
        due_soon: (next - today).num_days() == 1,
    }
}

/// Whole days between `from` and `today`, or `None` when `from` is unknown.
pub fn days_since(from: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    from.map(|d| (today - d).num_days())
}
