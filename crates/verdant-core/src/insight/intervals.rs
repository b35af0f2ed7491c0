//! Fixed care-interval tables, keyed by plant category.

use verdant_db::models::PlantCategory;

/// Days between waterings for a category.
pub fn watering_interval_days(category: PlantCategory) -> i64 {
    match category {
        PlantCategory::Flower => 3,
        PlantCategory::Fruit => 2,
        PlantCategory::Vegetable => 2,
        PlantCategory::Herb => 2,
        PlantCategory::Tree => 4,
        PlantCategory::Other => 3,
    }
}

/// Days between fertilizer applications for a category.
pub fn fertilizing_interval_days(category: PlantCategory) -> i64 {
    match category {
        PlantCategory::Flower => 14,
        PlantCategory::Fruit => 14,
        PlantCategory::Vegetable => 14,
        PlantCategory::Herb => 21,
        PlantCategory::Tree => 30,
        PlantCategory::Other => 14,
    }
}

/// String-keyed watering interval: lowercases and falls back to `other`.
pub fn watering_interval_for(category: &str) -> i64 {
    watering_interval_days(PlantCategory::parse_lossy(category))
}

/// String-keyed fertilizing interval: lowercases and falls back to `other`.
pub fn fertilizing_interval_for(category: &str) -> i64 {
    fertilizing_interval_days(PlantCategory::parse_lossy(category))
}
