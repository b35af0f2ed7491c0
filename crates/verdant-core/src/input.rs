//! Boundary validation: raw form values in, typed persistence parameters
//! out.
//!
//! Every create operation has a raw form struct (all-optional strings, as
//! they arrive from a form post) and a validation function that either
//! produces the typed `New*` parameters for the persistence layer or a
//! [`ValidationError`]. Nothing is written when validation fails.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use verdant_db::models::{PlantCategory, PlantStatus};
use verdant_db::queries::care_events::NewCareEvent;
use verdant_db::queries::contact_messages::NewContactMessage;
use verdant_db::queries::garden_plants::NewGardenPlant;
use verdant_db::queries::harvests::NewHarvest;
use verdant_db::queries::observations::NewObservation;

/// The fixed date format accepted from users.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a submitted form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid date {value:?} in field {field} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid number {value:?} in field {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid plant category: {0:?}")]
    InvalidCategory(String),

    #[error("invalid plant status: {0:?}")]
    InvalidStatus(String),

    #[error("no valid plant ids given")]
    EmptyIdList,
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Trim an optional string field; whitespace-only becomes absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A required non-empty string field.
fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::MissingField(field))
}

/// Parse a date in the fixed `YYYY-MM-DD` format.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Parse an optional date field, defaulting to `today` when absent.
fn date_or_today(
    field: &'static str,
    value: Option<String>,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    match optional(value) {
        Some(s) => parse_date(field, &s),
        None => Ok(today),
    }
}

/// Parse an optional decimal field. Empty is absent, not zero.
fn optional_f64(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<f64>, ValidationError> {
    match optional(value) {
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidNumber {
                field,
                value: s,
            }),
        None => Ok(None),
    }
}

/// Parse an optional integer field. Empty is absent, not zero.
fn optional_i32(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<i32>, ValidationError> {
    match optional(value) {
        Some(s) => s
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidNumber {
                field,
                value: s,
            }),
        None => Ok(None),
    }
}

/// Parse a comma-separated id list. Non-numeric tokens are silently
/// dropped; an empty result is a validation failure.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, ValidationError> {
    let ids: Vec<i64> = raw
        .split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect();

    if ids.is_empty() {
        return Err(ValidationError::EmptyIdList);
    }
    Ok(ids)
}

/// Parse a plant status string (exact lowercase match).
pub fn parse_status(value: &str) -> Result<PlantStatus, ValidationError> {
    value
        .trim()
        .to_lowercase()
        .parse()
        .map_err(|_| ValidationError::InvalidStatus(value.to_string()))
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Raw form values for creating a garden plant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GardenPlantForm {
    pub nickname: Option<String>,
    pub plant_name: Option<String>,
    pub scientific_name: Option<String>,
    pub category: Option<String>,
    pub variety: Option<String>,
    pub source: Option<String>,
    pub planting_date: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

/// Validate a garden-plant form into insert parameters.
pub fn validate_garden_plant(form: GardenPlantForm) -> Result<NewGardenPlant, ValidationError> {
    let plant_name = required("plant_name", form.plant_name)?;

    let raw_category = required("category", form.category)?;
    let category: PlantCategory = raw_category
        .to_lowercase()
        .parse()
        .map_err(|_| ValidationError::InvalidCategory(raw_category))?;

    let planting_date = match optional(form.planting_date) {
        Some(s) => Some(parse_date("planting_date", &s)?),
        None => None,
    };

    Ok(NewGardenPlant {
        nickname: optional(form.nickname),
        plant_name,
        scientific_name: optional(form.scientific_name),
        category,
        variety: optional(form.variety),
        source: optional(form.source),
        planting_date,
        location: optional(form.location),
        image_url: optional(form.image_url),
        notes: optional(form.notes),
    })
}

/// Raw form values for recording an observation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationForm {
    pub date: Option<String>,
    pub height_cm: Option<String>,
    pub leaves: Option<String>,
    pub flowers: Option<String>,
    pub fruits: Option<String>,
    pub pests: Option<String>,
    pub diseases: Option<String>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

/// Validate an observation form into insert parameters.
pub fn validate_observation(
    plant_id: i64,
    form: ObservationForm,
    today: NaiveDate,
) -> Result<NewObservation, ValidationError> {
    Ok(NewObservation {
        plant_id,
        date: date_or_today("date", form.date, today)?,
        height_cm: optional_f64("height_cm", form.height_cm)?,
        leaves: optional_i32("leaves", form.leaves)?,
        flowers: optional_i32("flowers", form.flowers)?,
        fruits: optional_i32("fruits", form.fruits)?,
        pests: optional(form.pests),
        diseases: optional(form.diseases),
        photo_url: optional(form.photo_url),
        notes: optional(form.notes),
    })
}

/// Raw form values for recording a care event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareEventForm {
    pub date: Option<String>,
    pub care_type: Option<String>,
    pub amount: Option<String>,
    pub notes: Option<String>,
}

/// Validate a care-event form into insert parameters. The care type is
/// lowercased so the insight engine's string matches are exact.
pub fn validate_care_event(
    plant_id: i64,
    form: CareEventForm,
    today: NaiveDate,
) -> Result<NewCareEvent, ValidationError> {
    let care_type = required("care_type", form.care_type)?.to_lowercase();

    Ok(NewCareEvent {
        plant_id,
        date: date_or_today("date", form.date, today)?,
        care_type,
        amount: optional(form.amount),
        notes: optional(form.notes),
    })
}

/// Raw form values for recording a harvest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarvestForm {
    pub date: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub quality: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

/// Validate a harvest form into insert parameters.
pub fn validate_harvest(
    plant_id: i64,
    form: HarvestForm,
    today: NaiveDate,
) -> Result<NewHarvest, ValidationError> {
    Ok(NewHarvest {
        plant_id,
        date: date_or_today("date", form.date, today)?,
        quantity: optional_f64("quantity", form.quantity)?,
        unit: optional(form.unit),
        quality: optional(form.quality),
        notes: optional(form.notes),
        photo_url: optional(form.photo_url),
    })
}

/// Raw form values for the contact form. All fields are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Validate a contact form into insert parameters.
pub fn validate_contact(form: ContactForm) -> Result<NewContactMessage, ValidationError> {
    Ok(NewContactMessage {
        name: required("name", form.name)?,
        email: required("email", form.email)?,
        subject: required("subject", form.subject)?,
        message: required("message", form.message)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    #[test]
    fn garden_plant_requires_name_and_category() {
        let err = validate_garden_plant(GardenPlantForm::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("plant_name"));

        let err = validate_garden_plant(GardenPlantForm {
            plant_name: Some("Tomato".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("category"));
    }

    #[test]
    fn garden_plant_category_is_case_normalized() {
        let new = validate_garden_plant(GardenPlantForm {
            plant_name: Some("Tomato".to_string()),
            category: Some("Vegetable".to_string()),
            ..Default::default()
        })
        .expect("valid form");
        assert_eq!(new.category, PlantCategory::Vegetable);
    }

    #[test]
    fn garden_plant_rejects_unknown_category() {
        let err = validate_garden_plant(GardenPlantForm {
            plant_name: Some("Aloe".to_string()),
            category: Some("succulent".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidCategory("succulent".to_string()));
    }

    #[test]
    fn malformed_planting_date_is_rejected() {
        let err = validate_garden_plant(GardenPlantForm {
            plant_name: Some("Tomato".to_string()),
            category: Some("vegetable".to_string()),
            planting_date: Some("04/01/2026".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "planting_date", .. }));
    }

    #[test]
    fn observation_date_defaults_to_today() {
        let today = date("2026-06-10");
        let new = validate_observation(1, ObservationForm::default(), today).expect("valid form");
        assert_eq!(new.date, today);
    }

    #[test]
    fn observation_numbers_parse_or_reject() {
        let today = date("2026-06-10");
        let new = validate_observation(
            1,
            ObservationForm {
                height_cm: Some("12.5".to_string()),
                leaves: Some("8".to_string()),
                flowers: Some("".to_string()),
                ..Default::default()
            },
            today,
        )
        .expect("valid form");
        assert_eq!(new.height_cm, Some(12.5));
        assert_eq!(new.leaves, Some(8));
        // Empty string means absent, not zero.
        assert_eq!(new.flowers, None);

        let err = validate_observation(
            1,
            ObservationForm {
                leaves: Some("many".to_string()),
                ..Default::default()
            },
            today,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "leaves", .. }));
    }

    #[test]
    fn care_event_type_is_lowercased() {
        let today = date("2026-06-10");
        let new = validate_care_event(
            1,
            CareEventForm {
                care_type: Some("Watering".to_string()),
                ..Default::default()
            },
            today,
        )
        .expect("valid form");
        assert_eq!(new.care_type, "watering");
        assert_eq!(new.date, today);
    }

    #[test]
    fn harvest_quantity_must_be_numeric() {
        let today = date("2026-06-10");
        let err = validate_harvest(
            1,
            HarvestForm {
                quantity: Some("a basket".to_string()),
                ..Default::default()
            },
            today,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "quantity", .. }));
    }

    #[test]
    fn contact_requires_all_fields() {
        let err = validate_contact(ContactForm {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            subject: Some("Hi".to_string()),
            message: None,
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("message"));
    }

    #[test]
    fn id_list_drops_non_numeric_tokens() {
        assert_eq!(parse_id_list("1, 2, pansy, 3").expect("some ids"), vec![1, 2, 3]);
    }

    #[test]
    fn id_list_empty_after_filtering_is_an_error() {
        assert_eq!(parse_id_list("pansy, fern").unwrap_err(), ValidationError::EmptyIdList);
        assert_eq!(parse_id_list("").unwrap_err(), ValidationError::EmptyIdList);
    }

    #[test]
    fn date_format_is_strict() {
        assert!(parse_date("date", "2026-06-10").is_ok());
        assert!(parse_date("date", "10-06-2026").is_err());
        assert!(parse_date("date", "2026/06/10").is_err());
        assert!(parse_date("date", "yesterday").is_err());
    }
}
