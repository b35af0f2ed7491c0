//! Unified event timeline across observations, care events and harvests.

use chrono::NaiveDate;
use serde::Serialize;

use verdant_db::models::{CareEvent, Harvest, Observation};

/// One entry in a plant's merged history, tagged with its kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry {
    Observation(Observation),
    Care(CareEvent),
    Harvest(Harvest),
}

impl TimelineEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Observation(o) => o.date,
            Self::Care(c) => c.date,
            Self::Harvest(h) => h.date,
        }
    }
}

/// Merge the three event histories into one sequence, newest first.
///
/// Entries sharing a date keep their concatenation order (observations,
/// then care events, then harvests, each in their input order): the sort
/// is stable.
pub fn merge_timeline(
    observations: &[Observation],
    care_events: &[CareEvent],
    harvests: &[Harvest],
) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = Vec::with_capacity(
        observations.len() + care_events.len() + harvests.len(),
    );
    entries.extend(observations.iter().cloned().map(TimelineEntry::Observation));
    entries.extend(care_events.iter().cloned().map(TimelineEntry::Care));
    entries.extend(harvests.iter().cloned().map(TimelineEntry::Harvest));

    entries.sort_by(|a, b| b.date().cmp(&a.date()));
    entries
}
