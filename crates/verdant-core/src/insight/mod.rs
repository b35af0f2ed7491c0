//! Scheduling/insight engine.
//!
//! Pure functions from a plant's recorded history (observations, care
//! events, harvests) to due dates, milestones, counters and advisories.
//! The engine never touches the database; callers load the history and
//! pass slices in.

pub mod companion;
pub mod intervals;
pub mod milestones;
pub mod schedule;
pub mod suggestions;
pub mod timeline;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use verdant_db::models::{CareEvent, GardenPlant, Harvest, Observation};

pub use companion::{CompanionAdvice, companions_for};
pub use milestones::{Milestones, detect_milestones};
pub use schedule::{DueStatus, FERTILIZING, SPRAY, TREATMENT, WATERING};
pub use suggestions::{Severity, Suggestion};
pub use timeline::{TimelineEntry, merge_timeline};

/// One point of the height-over-time chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub height_cm: f64,
}

/// Everything the insight engine derives for a single plant.
#[derive(Debug, Clone, Serialize)]
pub struct PlantInsights {
    pub water_interval_days: i64,
    pub fert_interval_days: i64,
    pub watering: DueStatus,
    pub fertilizing: DueStatus,
    pub days_since_planting: Option<i64>,
    pub days_since_watering: Option<i64>,
    pub days_since_fertilizing: Option<i64>,
    pub milestones: Milestones,
    pub growth_series: Vec<GrowthPoint>,
    /// Total harvested quantity per distinct unit string; no conversion.
    pub harvest_totals: BTreeMap<String, f64>,
    pub suggestions: Vec<Suggestion>,
    pub companions: Option<CompanionAdvice>,
}

/// The ordered (date, height) series from observations that recorded a
/// height. `observations` must be sorted ascending by date.
pub fn growth_series(observations: &[Observation]) -> Vec<GrowthPoint> {
    observations
        .iter()
        .filter_map(|obs| {
            obs.height_cm.map(|height_cm| GrowthPoint {
                date: obs.date,
                height_cm,
            })
        })
        .collect()
}

/// Sum harvested quantities per unit. Rows missing quantity or unit are
/// skipped (absent, not zero).
pub fn harvest_totals(harvests: &[Harvest]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for harvest in harvests {
        if let (Some(quantity), Some(unit)) = (harvest.quantity, harvest.unit.as_deref()) {
            *totals.entry(unit.to_string()).or_insert(0.0) += quantity;
        }
    }
    totals
}

/// Compute the full insight set for one plant.
///
/// `observations`, `care_events` and `harvests` are the plant's complete
/// histories, observations sorted ascending by date.
pub fn compute_insights(
    plant: &GardenPlant,
    observations: &[Observation],
    care_events: &[CareEvent],
    harvests: &[Harvest],
    today: NaiveDate,
) -> PlantInsights {
    let water_interval_days = intervals::watering_interval_days(plant.category);
    let fert_interval_days = intervals::fertilizing_interval_days(plant.category);

    let last_watering = schedule::last_event_date(care_events, WATERING);
    let last_fertilizing = schedule::last_event_date(care_events, FERTILIZING);

    let watering = schedule::next_due(last_watering, plant.planting_date, water_interval_days, today);
    let mut fertilizing =
        schedule::next_due(last_fertilizing, plant.planting_date, fert_interval_days, today);
    // "Due soon" is a watering-only notion.
    fertilizing.due_soon = false;

    let days_since_watering = schedule::days_since(last_watering, today);
    let days_since_fertilizing = schedule::days_since(last_fertilizing, today);

    let suggestions = suggestions::suggested_actions(
        days_since_watering,
        days_since_fertilizing,
        water_interval_days,
        fert_interval_days,
        observations,
        care_events,
        today,
    );

    PlantInsights {
        water_interval_days,
        fert_interval_days,
        watering,
        fertilizing,
        days_since_planting: schedule::days_since(plant.planting_date, today),
        days_since_watering,
        days_since_fertilizing,
        milestones: detect_milestones(observations, harvests),
        growth_series: growth_series(observations),
        harvest_totals: harvest_totals(harvests),
        suggestions,
        companions: companions_for(&plant.plant_name),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use verdant_db::models::{PlantCategory, PlantStatus};

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn plant(name: &str, category: PlantCategory, planted: Option<&str>) -> GardenPlant {
        GardenPlant {
            id: 1,
            nickname: None,
            plant_name: name.to_string(),
            scientific_name: None,
            category,
            variety: None,
            source: None,
            planting_date: planted.map(date),
            location: None,
            image_url: None,
            status: PlantStatus::Active,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn obs(d: &str, height: Option<f64>) -> Observation {
        Observation {
            id: 0,
            plant_id: 1,
            date: date(d),
            height_cm: height,
            leaves: None,
            flowers: None,
            fruits: None,
            pests: None,
            diseases: None,
            photo_url: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn care(d: &str, ty: &str) -> CareEvent {
        CareEvent {
            id: 0,
            plant_id: 1,
            date: date(d),
            care_type: ty.to_string(),
            amount: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn harvest(d: &str, quantity: Option<f64>, unit: Option<&str>) -> Harvest {
        Harvest {
            id: 0,
            plant_id: 1,
            date: date(d),
            quantity,
            unit: unit.map(str::to_string),
            quality: None,
            notes: None,
            photo_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fresh_vegetable_is_due_everything() {
        let today = date("2026-06-10");
        let p = plant("Tomato", PlantCategory::Vegetable, None);
        let insights = compute_insights(&p, &[], &[], &[], today);

        assert_eq!(insights.water_interval_days, 2);
        assert_eq!(insights.fert_interval_days, 14);
        assert_eq!(insights.watering.next, today);
        assert!(insights.watering.due);
        assert!(insights.fertilizing.due);
        assert_eq!(insights.days_since_planting, None);

        let messages: Vec<&str> = insights.suggestions.iter().map(|s| s.message.as_str()).collect();
        assert_eq!(messages, ["water today", "fertilize this week"]);
        assert_eq!(insights.suggestions[0].severity, Severity::High);
    }

    #[test]
    fn watering_anchored_to_last_event() {
        let today = date("2026-06-10");
        let p = plant("Rose", PlantCategory::Flower, Some("2026-05-01"));
        let events = vec![care("2026-06-09", WATERING), care("2026-06-01", FERTILIZING)];
        let insights = compute_insights(&p, &[], &events, &[], today);

        // flower: water every 3 days, fertilize every 14.
        assert_eq!(insights.watering.next, date("2026-06-12"));
        assert!(!insights.watering.due);
        assert_eq!(insights.fertilizing.next, date("2026-06-15"));
        assert!(!insights.fertilizing.due);
        assert!(!insights.fertilizing.due_soon);
        assert_eq!(insights.days_since_watering, Some(1));
        assert_eq!(insights.days_since_fertilizing, Some(9));
        assert_eq!(insights.days_since_planting, Some(40));
    }

    #[test]
    fn planting_date_anchors_when_no_history() {
        let today = date("2026-06-10");
        let p = plant("Apple", PlantCategory::Tree, Some("2026-06-08"));
        let insights = compute_insights(&p, &[], &[], &[], today);

        // tree: watering interval 4 days from planting.
        assert_eq!(insights.watering.next, date("2026-06-12"));
        assert!(!insights.watering.due);
    }

    #[test]
    fn growth_series_skips_missing_heights() {
        let observations = vec![
            obs("2026-06-01", Some(5.0)),
            obs("2026-06-05", None),
            obs("2026-06-09", Some(11.5)),
        ];
        let series = growth_series(&observations);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, date("2026-06-01"));
        assert_eq!(series[0].height_cm, 5.0);
        assert_eq!(series[1].height_cm, 11.5);
    }

    #[test]
    fn harvest_totals_keep_units_apart() {
        let harvests = vec![
            harvest("2026-07-01", Some(2.0), Some("kg")),
            harvest("2026-07-05", Some(500.0), Some("g")),
            harvest("2026-07-08", None, Some("kg")),
            harvest("2026-07-09", Some(3.0), None),
        ];
        let totals = harvest_totals(&harvests);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["kg"], 2.0);
        assert_eq!(totals["g"], 500.0);
    }

    #[test]
    fn companions_come_from_plant_name() {
        let today = date("2026-06-10");
        let p = plant("Tomato", PlantCategory::Vegetable, None);
        let insights = compute_insights(&p, &[], &[], &[], today);
        assert!(insights.companions.is_some());

        let q = plant("Moonflower", PlantCategory::Flower, None);
        let insights = compute_insights(&q, &[], &[], &[], today);
        assert!(insights.companions.is_none());
    }
}
