//! CSV export of a plant's full event log.
//!
//! One row per timeline entry; columns that do not apply to a row's kind
//! stay blank. Fields containing commas, quotes or newlines are quoted.

use crate::insight::TimelineEntry;

/// Column order of the exported log.
pub const LOG_COLUMNS: [&str; 14] = [
    "type",
    "date",
    "notes",
    "height_cm",
    "leaves",
    "flowers",
    "fruits",
    "pests",
    "diseases",
    "care_type",
    "care_amount",
    "harvest_quantity",
    "harvest_unit",
    "harvest_quality",
];

/// Attachment filename for a plant's exported log.
pub fn log_filename(plant_id: i64) -> String {
    format!("plant_{plant_id}_log.csv")
}

/// Quote a field when it contains a comma, quote or newline.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn opt(value: &Option<String>) -> String {
    field(value.as_deref().unwrap_or(""))
}

fn num<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

/// Render the merged timeline as a CSV document, header first.
pub fn plant_log_csv(timeline: &[TimelineEntry]) -> String {
    let mut out = String::new();
    out.push_str(&LOG_COLUMNS.join(","));
    out.push('\n');

    for entry in timeline {
        let date = entry.date().format("%Y-%m-%d").to_string();
        let row = match entry {
            TimelineEntry::Observation(o) => [
                "observation".to_string(),
                date,
                opt(&o.notes),
                num(&o.height_cm),
                num(&o.leaves),
                num(&o.flowers),
                num(&o.fruits),
                opt(&o.pests),
                opt(&o.diseases),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
            TimelineEntry::Care(c) => [
                "care".to_string(),
                date,
                opt(&c.notes),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                field(&c.care_type),
                opt(&c.amount),
                String::new(),
                String::new(),
                String::new(),
            ],
            TimelineEntry::Harvest(h) => [
                "harvest".to_string(),
                date,
                opt(&h.notes),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                num(&h.quantity),
                opt(&h.unit),
                opt(&h.quality),
            ],
        };
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Parse a CSV document back into rows of fields.
///
/// Understands the quoting [`plant_log_csv`] produces; used to verify
/// exports round-trip.
pub fn parse_csv(data: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = data.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => in_quotes = false,
                _ => current.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut current)),
                '\n' => {
                    row.push(std::mem::take(&mut current));
                    rows.push(std::mem::take(&mut row));
                }
                '\r' => {}
                _ => current.push(c),
            }
        }
    }

    if !current.is_empty() || !row.is_empty() {
        row.push(current);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use verdant_db::models::{CareEvent, Harvest, Observation};

    use crate::insight::merge_timeline;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn obs(d: &str, notes: Option<&str>) -> Observation {
        Observation {
            id: 0,
            plant_id: 1,
            date: date(d),
            height_cm: Some(12.5),
            leaves: Some(6),
            flowers: None,
            fruits: None,
            pests: None,
            diseases: None,
            photo_url: None,
            notes: notes.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn care(d: &str, notes: Option<&str>) -> CareEvent {
        CareEvent {
            id: 0,
            plant_id: 1,
            date: date(d),
            care_type: "watering".to_string(),
            amount: Some("1 L".to_string()),
            notes: notes.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn harvest(d: &str) -> Harvest {
        Harvest {
            id: 0,
            plant_id: 1,
            date: date(d),
            quantity: Some(2.5),
            unit: Some("kg".to_string()),
            quality: Some("good".to_string()),
            notes: None,
            photo_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn filename_embeds_plant_id() {
        assert_eq!(log_filename(42), "plant_42_log.csv");
    }

    #[test]
    fn header_matches_column_order() {
        let csv = plant_log_csv(&[]);
        assert_eq!(
            csv.lines().next().unwrap(),
            "type,date,notes,height_cm,leaves,flowers,fruits,pests,diseases,\
             care_type,care_amount,harvest_quantity,harvest_unit,harvest_quality"
        );
    }

    #[test]
    fn inapplicable_columns_stay_blank() {
        let timeline = merge_timeline(&[], &[care("2026-06-10", None)], &[]);
        let csv = plant_log_csv(&timeline);
        let rows = parse_csv(&csv);
        assert_eq!(rows.len(), 2);

        let row = &rows[1];
        assert_eq!(row.len(), LOG_COLUMNS.len());
        assert_eq!(row[0], "care");
        assert_eq!(row[9], "watering");
        assert_eq!(row[10], "1 L");
        // Observation and harvest columns are blank.
        assert_eq!(row[3], "");
        assert_eq!(row[11], "");
    }

    #[test]
    fn notes_with_commas_are_quoted() {
        let timeline = merge_timeline(
            &[obs("2026-06-10", Some("leggy, needs staking"))],
            &[],
            &[],
        );
        let csv = plant_log_csv(&timeline);
        assert!(csv.contains("\"leggy, needs staking\""));

        let rows = parse_csv(&csv);
        assert_eq!(rows[1][2], "leggy, needs staking");
    }

    #[test]
    fn roundtrip_recovers_type_date_notes() {
        let observations = vec![obs("2026-06-01", Some("first true leaves"))];
        let care_events = vec![care("2026-06-03", Some("morning"))];
        let harvests = vec![harvest("2026-07-20")];
        let timeline = merge_timeline(&observations, &care_events, &harvests);

        let csv = plant_log_csv(&timeline);
        let rows = parse_csv(&csv);

        let tuples: Vec<(String, String, String)> = rows[1..]
            .iter()
            .map(|r| (r[0].clone(), r[1].clone(), r[2].clone()))
            .collect();

        assert!(tuples.contains(&(
            "observation".to_string(),
            "2026-06-01".to_string(),
            "first true leaves".to_string()
        )));
        assert!(tuples.contains(&(
            "care".to_string(),
            "2026-06-03".to_string(),
            "morning".to_string()
        )));
        assert!(tuples.contains(&(
            "harvest".to_string(),
            "2026-07-20".to_string(),
            String::new()
        )));
    }

    #[test]
    fn quoted_quotes_roundtrip() {
        let timeline = merge_timeline(
            &[obs("2026-06-10", Some("tied to \"main\" stake\nchecked roots"))],
            &[],
            &[],
        );
        let csv = plant_log_csv(&timeline);
        let rows = parse_csv(&csv);
        assert_eq!(rows[1][2], "tied to \"main\" stake\nchecked roots");
    }
}
