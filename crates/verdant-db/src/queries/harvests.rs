//! Database query functions for the `harvests` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::Harvest;

/// Parameters for inserting a new harvest row.
#[derive(Debug, Clone)]
pub struct NewHarvest {
    pub plant_id: i64,
    pub date: NaiveDate,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub quality: Option<String>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

/// Insert a new harvest row. Returns the inserted row with server-generated
/// defaults (id, created_at).
pub async fn insert_harvest(pool: &PgPool, new: &NewHarvest) -> Result<Harvest> {
    let harvest = sqlx::query_as::<_, Harvest>(
        "INSERT INTO harvests (plant_id, date, quantity, unit, quality, notes, photo_url) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING *",
    )
    .bind(new.plant_id)
    .bind(new.date)
    .bind(new.quantity)
    .bind(&new.unit)
    .bind(&new.quality)
    .bind(&new.notes)
    .bind(&new.photo_url)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert harvest for plant {}", new.plant_id))?;

    Ok(harvest)
}

/// Get all harvests for a plant, ordered by date ASC then id ASC.
pub async fn list_harvests_for_plant(pool: &PgPool, plant_id: i64) -> Result<Vec<Harvest>> {
    let harvests = sqlx::query_as::<_, Harvest>(
        "SELECT * FROM harvests \
         WHERE plant_id = $1 \
         ORDER BY date ASC, id ASC",
    )
    .bind(plant_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to list harvests for plant {plant_id}"))?;

    Ok(harvests)
}

/// Count the harvests recorded for a plant.
pub async fn count_harvests_for_plant(pool: &PgPool, plant_id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM harvests WHERE plant_id = $1")
        .bind(plant_id)
        .fetch_one(pool)
        .await
        .with_context(|| format!("failed to count harvests for plant {plant_id}"))?;

    Ok(row.0)
}
