//! Growth-milestone detection from the observation and harvest histories.

use chrono::NaiveDate;
use serde::Serialize;

use verdant_db::models::{Harvest, Observation};

/// First-occurrence dates of the growth milestones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Milestones {
    pub first_flower: Option<NaiveDate>,
    pub first_fruit: Option<NaiveDate>,
    pub first_harvest: Option<NaiveDate>,
}

/// Scan observations (ascending by date) for the first flower and fruit
/// counts above zero, and take the earliest harvest date.
///
/// `observations` must already be sorted ascending by date, as the
/// persistence layer returns them.
pub fn detect_milestones(observations: &[Observation], harvests: &[Harvest]) -> Milestones {
    let mut first_flower = None;
    let mut first_fruit = None;

    for obs in observations {
        if first_flower.is_none() && obs.flowers.is_some_and(|n| n > 0) {
            first_flower = Some(obs.date);
        }
        if first_fruit.is_none() && obs.fruits.is_some_and(|n| n > 0) {
            first_fruit = Some(obs.date);
        }
        if first_flower.is_some() && first_fruit.is_some() {
            break;
        }
    }

    let first_harvest = harvests.iter().map(|h| h.date).min();

    Milestones {
        first_flower,
        first_fruit,
        first_harvest,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn obs(d: &str, flowers: Option<i32>, fruits: Option<i32>) -> Observation {
        Observation {
            id: 0,
            plant_id: 1,
            date: date(d),
            height_cm: None,
            leaves: None,
            flowers,
            fruits,
            pests: None,
            diseases: None,
            photo_url: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn harvest(d: &str) -> Harvest {
        Harvest {
            id: 0,
            plant_id: 1,
            date: date(d),
            quantity: Some(1.0),
            unit: Some("kg".to_string()),
            quality: None,
            notes: None,
            photo_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fruit_can_precede_flower() {
        // Day one records fruit but no flowers; day two the reverse.
        let observations = vec![
            obs("2026-06-01", Some(0), Some(2)),
            obs("2026-06-02", Some(3), Some(0)),
        ];
        let m = detect_milestones(&observations, &[]);
        assert_eq!(m.first_fruit, Some(date("2026-06-01")));
        assert_eq!(m.first_flower, Some(date("2026-06-02")));
        assert_eq!(m.first_harvest, None);
    }

    #[test]
    fn zero_counts_do_not_trigger() {
        let observations = vec![obs("2026-06-01", Some(0), Some(0)), obs("2026-06-02", None, None)];
        let m = detect_milestones(&observations, &[]);
        assert_eq!(m.first_flower, None);
        assert_eq!(m.first_fruit, None);
    }

    #[test]
    fn first_harvest_is_minimum_date() {
        let harvests = vec![harvest("2026-07-20"), harvest("2026-07-05"), harvest("2026-08-01")];
        let m = detect_milestones(&[], &harvests);
        assert_eq!(m.first_harvest, Some(date("2026-07-05")));
    }

    #[test]
    fn empty_history_yields_no_milestones() {
        let m = detect_milestones(&[], &[]);
        assert_eq!(m, Milestones::default());
    }
}
