//! Suggested-action derivation: what to do for a plant today.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use verdant_db::models::{CareEvent, Observation};

use super::schedule::{SPRAY, TREATMENT};

/// How urgently a suggestion should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
        };
        f.write_str(s)
    }
}

/// A single suggested action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub message: String,
    pub severity: Severity,
}

impl Suggestion {
    fn new(message: &str, severity: Severity) -> Self {
        Self {
            message: message.to_string(),
            severity,
        }
    }
}

/// Window, in days, within which pest/disease sightings and counteracting
/// spray/treatment events are considered current.
const PEST_WINDOW_DAYS: i64 = 7;

/// Derive the ordered suggestion list for a plant.
///
/// Watering rules are mutually exclusive: "water today" wins over
/// "water soon". The pest rule fires when a recent observation notes pests
/// or disease and no spray/treatment has happened inside the window.
pub fn suggested_actions(
    days_since_watering: Option<i64>,
    days_since_fertilizing: Option<i64>,
    water_interval: i64,
    fert_interval: i64,
    observations: &[Observation],
    care_events: &[CareEvent],
    today: NaiveDate,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    match days_since_watering {
        None => suggestions.push(Suggestion::new("water today", Severity::High)),
        Some(days) if days >= water_interval => {
            suggestions.push(Suggestion::new("water today", Severity::High));
        }
        Some(days) if days >= water_interval - 1 => {
            suggestions.push(Suggestion::new("water soon", Severity::Medium));
        }
        Some(_) => {}
    }

    match days_since_fertilizing {
        None => suggestions.push(Suggestion::new("fertilize this week", Severity::Medium)),
        Some(days) if days >= fert_interval => {
            suggestions.push(Suggestion::new("fertilize this week", Severity::Medium));
        }
        Some(_) => {}
    }

    if has_recent_pest_sighting(observations, today)
        && !has_recent_counteraction(care_events, today)
    {
        suggestions.push(Suggestion::new("inspect for pests/disease", Severity::High));
    }

    suggestions
}

fn within_window(date: NaiveDate, today: NaiveDate) -> bool {
    let days = (today - date).num_days();
    (0..=PEST_WINDOW_DAYS).contains(&days)
}

fn has_recent_pest_sighting(observations: &[Observation], today: NaiveDate) -> bool {
    observations.iter().any(|obs| {
        within_window(obs.date, today)
            && (obs.pests.as_deref().is_some_and(|s| !s.trim().is_empty())
                || obs.diseases.as_deref().is_some_and(|s| !s.trim().is_empty()))
    })
}

fn has_recent_counteraction(care_events: &[CareEvent], today: NaiveDate) -> bool {
    care_events.iter().any(|event| {
        (event.care_type == SPRAY || event.care_type == TREATMENT)
            && within_window(event.date, today)
    })
}
