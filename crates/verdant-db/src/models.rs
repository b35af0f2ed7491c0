use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Category of a logged garden plant. Drives the watering and fertilizing
/// interval tables in the insight engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlantCategory {
    Flower,
    Fruit,
    Vegetable,
    Herb,
    Tree,
    Other,
}

impl PlantCategory {
    /// Case-normalize and parse, falling back to [`PlantCategory::Other`]
    /// for anything unrecognized. Interval lookups use this so an unknown
    /// category never fails a page render.
    pub fn parse_lossy(s: &str) -> Self {
        s.trim().to_lowercase().parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for PlantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flower => "flower",
            Self::Fruit => "fruit",
            Self::Vegetable => "vegetable",
            Self::Herb => "herb",
            Self::Tree => "tree",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for PlantCategory {
    type Err = PlantCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flower" => Ok(Self::Flower),
            "fruit" => Ok(Self::Fruit),
            "vegetable" => Ok(Self::Vegetable),
            "herb" => Ok(Self::Herb),
            "tree" => Ok(Self::Tree),
            "other" => Ok(Self::Other),
            other => Err(PlantCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlantCategory`] string.
#[derive(Debug, Clone)]
pub struct PlantCategoryParseError(pub String);

impl fmt::Display for PlantCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plant category: {:?}", self.0)
    }
}

impl std::error::Error for PlantCategoryParseError {}

// ---------------------------------------------------------------------------

/// Lifecycle status of a logged garden plant. Plants are retired by status
/// change rather than physical deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlantStatus {
    Active,
    Harvested,
    Removed,
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Harvested => "harvested",
            Self::Removed => "removed",
        };
        f.write_str(s)
    }
}

impl FromStr for PlantStatus {
    type Err = PlantStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "harvested" => Ok(Self::Harvested),
            "removed" => Ok(Self::Removed),
            other => Err(PlantStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlantStatus`] string.
#[derive(Debug, Clone)]
pub struct PlantStatusParseError(pub String);

impl fmt::Display for PlantStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plant status: {:?}", self.0)
    }
}

impl std::error::Error for PlantStatusParseError {}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A message submitted through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A purchasable plant in the storefront catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: i64,
    pub name: String,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

/// A blog post. `tags` is a comma-separated field split by the tag-ranking
/// aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// A plant the user is growing, tracked in the garden logbook.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GardenPlant {
    pub id: i64,
    pub nickname: Option<String>,
    pub plant_name: String,
    pub scientific_name: Option<String>,
    pub category: PlantCategory,
    pub variety: Option<String>,
    pub source: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: PlantStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A dated growth snapshot of a garden plant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Observation {
    pub id: i64,
    pub plant_id: i64,
    pub date: NaiveDate,
    pub height_cm: Option<f64>,
    pub leaves: Option<i32>,
    pub flowers: Option<i32>,
    pub fruits: Option<i32>,
    pub pests: Option<String>,
    pub diseases: Option<String>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A dated maintenance action (watering, fertilizing, pruning, ...).
///
/// `care_type` is an open set; the insight engine matches on the lowercase
/// strings `watering`, `fertilizing`, `spray` and `treatment`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareEvent {
    pub id: i64,
    pub plant_id: i64,
    pub date: NaiveDate,
    pub care_type: String,
    pub amount: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A dated yield record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Harvest {
    pub id: i64,
    pub plant_id: i64,
    pub date: NaiveDate,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub quality: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_category_display_roundtrip() {
        let variants = [
            PlantCategory::Flower,
            PlantCategory::Fruit,
            PlantCategory::Vegetable,
            PlantCategory::Herb,
            PlantCategory::Tree,
            PlantCategory::Other,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: PlantCategory = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn plant_category_invalid() {
        let result = "cactus".parse::<PlantCategory>();
        assert!(result.is_err());
    }

    #[test]
    fn plant_category_parse_lossy_normalizes_case() {
        assert_eq!(PlantCategory::parse_lossy("Vegetable"), PlantCategory::Vegetable);
        assert_eq!(PlantCategory::parse_lossy(" HERB "), PlantCategory::Herb);
    }

    #[test]
    fn plant_category_parse_lossy_falls_back_to_other() {
        assert_eq!(PlantCategory::parse_lossy("succulent"), PlantCategory::Other);
        assert_eq!(PlantCategory::parse_lossy(""), PlantCategory::Other);
    }

    #[test]
    fn plant_status_display_roundtrip() {
        let variants = [
            PlantStatus::Active,
            PlantStatus::Harvested,
            PlantStatus::Removed,
        ];
        for v in &variants {
            let s = v.to_string();
            let parsed: PlantStatus = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn plant_status_invalid() {
        let result = "dormant".parse::<PlantStatus>();
        assert!(result.is_err());
    }
}
