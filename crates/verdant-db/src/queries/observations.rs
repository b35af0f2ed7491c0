//! Database query functions for the `observations` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::Observation;

/// Parameters for inserting a new observation row.
#[derive(Debug, Clone)]
pub struct NewObservation {
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
}

/// Insert a new observation row. Returns the inserted row with
/// server-generated defaults (id, created_at).
pub async fn insert_observation(pool: &PgPool, new: &NewObservation) -> Result<Observation> {
    let observation = sqlx::query_as::<_, Observation>(
        "INSERT INTO observations \
             (plant_id, date, height_cm, leaves, flowers, fruits, \
              pests, diseases, photo_url, notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING *",
    )
    .bind(new.plant_id)
    .bind(new.date)
    .bind(new.height_cm)
    .bind(new.leaves)
    .bind(new.flowers)
    .bind(new.fruits)
    .bind(&new.pests)
    .bind(&new.diseases)
    .bind(&new.photo_url)
    .bind(&new.notes)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert observation for plant {}", new.plant_id))?;

    Ok(observation)
}

/// Get all observations for a plant, ordered by date ASC then id ASC.
///
/// Ascending order is what the milestone scan and growth series expect.
pub async fn list_observations_for_plant(pool: &PgPool, plant_id: i64) -> Result<Vec<Observation>> {
    let observations = sqlx::query_as::<_, Observation>(
        "SELECT * FROM observations \
         WHERE plant_id = $1 \
         ORDER BY date ASC, id ASC",
    )
    .bind(plant_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to list observations for plant {plant_id}"))?;

    Ok(observations)
}

/// Count the observations recorded for a plant.
pub async fn count_observations_for_plant(pool: &PgPool, plant_id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM observations WHERE plant_id = $1")
        .bind(plant_id)
        .fetch_one(pool)
        .await
        .with_context(|| format!("failed to count observations for plant {plant_id}"))?;

    Ok(row.0)
}
