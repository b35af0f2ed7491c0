//! End-to-end insight computation over a realistic season of records.

use chrono::{NaiveDate, Utc};

use verdant_core::export::{parse_csv, plant_log_csv};
use verdant_core::insight::{self, Severity, TimelineEntry};
use verdant_db::models::{CareEvent, GardenPlant, Harvest, Observation, PlantCategory, PlantStatus};

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

fn tomato() -> GardenPlant {
    GardenPlant {
        id: 7,
        nickname: Some("Balcony tomato".to_string()),
        plant_name: "Tomato".to_string(),
        scientific_name: Some("Solanum lycopersicum".to_string()),
        category: PlantCategory::Vegetable,
        variety: Some("Sungold".to_string()),
        source: Some("seed".to_string()),
        planting_date: Some(date("2026-04-15")),
        location: Some("balcony".to_string()),
        image_url: None,
        status: PlantStatus::Active,
        notes: None,
        created_at: Utc::now(),
    }
}

fn observation(d: &str, height: Option<f64>, flowers: Option<i32>, fruits: Option<i32>, pests: Option<&str>) -> Observation {
    Observation {
        id: 0,
        plant_id: 7,
        date: date(d),
        height_cm: height,
        leaves: None,
        flowers,
        fruits,
        pests: pests.map(str::to_string),
        diseases: None,
        photo_url: None,
        notes: None,
        created_at: Utc::now(),
    }
}

fn care(d: &str, ty: &str) -> CareEvent {
    CareEvent {
        id: 0,
        plant_id: 7,
        date: date(d),
        care_type: ty.to_string(),
        amount: None,
        notes: None,
        created_at: Utc::now(),
    }
}

fn harvest(d: &str, quantity: f64, unit: &str) -> Harvest {
    Harvest {
        id: 0,
        plant_id: 7,
        date: date(d),
        quantity: Some(quantity),
        unit: Some(unit.to_string()),
        quality: Some("good".to_string()),
        notes: None,
        photo_url: None,
        created_at: Utc::now(),
    }
}

#[test]
fn season_of_records_produces_consistent_insights() {
    let plant = tomato();
    let observations = vec![
        observation("2026-05-01", Some(8.0), Some(0), Some(0), None),
        observation("2026-05-20", Some(35.0), Some(4), Some(0), None),
        observation("2026-06-05", Some(60.0), Some(6), Some(3), None),
        observation("2026-07-28", Some(120.0), None, None, Some("hornworm")),
    ];
    let care_events = vec![
        care("2026-07-25", "watering"),
        care("2026-07-30", "watering"),
        care("2026-07-20", "fertilizing"),
        care("2026-05-10", "weeding"),
    ];
    let harvests = vec![
        harvest("2026-07-10", 0.4, "kg"),
        harvest("2026-07-24", 0.9, "kg"),
        harvest("2026-07-24", 6.0, "count"),
    ];
    let today = date("2026-08-01");

    let insights = insight::compute_insights(&plant, &observations, &care_events, &harvests, today);

    // Vegetable intervals.
    assert_eq!(insights.water_interval_days, 2);
    assert_eq!(insights.fert_interval_days, 14);

    // Watered 2026-07-30, so due again 2026-08-01 (today).
    assert_eq!(insights.watering.next, date("2026-08-01"));
    assert!(insights.watering.due);
    assert_eq!(insights.days_since_watering, Some(2));

    // Fertilized 2026-07-20, due 2026-08-03.
    assert_eq!(insights.fertilizing.next, date("2026-08-03"));
    assert!(!insights.fertilizing.due);
    assert_eq!(insights.days_since_fertilizing, Some(12));

    assert_eq!(insights.days_since_planting, Some(108));

    // Milestones from the ascending observation scan.
    assert_eq!(insights.milestones.first_flower, Some(date("2026-05-20")));
    assert_eq!(insights.milestones.first_fruit, Some(date("2026-06-05")));
    assert_eq!(insights.milestones.first_harvest, Some(date("2026-07-10")));

    // Growth series keeps all four heights, ascending.
    assert_eq!(insights.growth_series.len(), 4);
    assert_eq!(insights.growth_series[0].height_cm, 8.0);
    assert_eq!(insights.growth_series[3].height_cm, 120.0);

    // Totals per unit, no conversion.
    assert_eq!(insights.harvest_totals["kg"], 1.3);
    assert_eq!(insights.harvest_totals["count"], 6.0);

    // Water due + recent hornworm sighting with no spray/treatment.
    let messages: Vec<&str> = insights.suggestions.iter().map(|s| s.message.as_str()).collect();
    assert_eq!(messages, ["water today", "inspect for pests/disease"]);
    assert!(insights.suggestions.iter().all(|s| s.severity == Severity::High));

    // Tomato is in the companion table.
    let companions = insights.companions.expect("tomato has companion advice");
    assert!(companions.good.contains(&"basil"));
}

#[test]
fn timeline_and_csv_cover_every_record() {
    let observations = vec![observation("2026-05-01", Some(8.0), None, None, None)];
    let care_events = vec![care("2026-05-03", "watering"), care("2026-05-06", "pruning")];
    let harvests = vec![harvest("2026-07-10", 0.4, "kg")];

    let timeline = insight::merge_timeline(&observations, &care_events, &harvests);
    assert_eq!(timeline.len(), 4);
    assert!(matches!(timeline[0], TimelineEntry::Harvest(_)));

    let csv = plant_log_csv(&timeline);
    let rows = parse_csv(&csv);
    // Header plus one row per record.
    assert_eq!(rows.len(), 5);
    let kinds: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(kinds, ["harvest", "care", "care", "observation"]);
}
