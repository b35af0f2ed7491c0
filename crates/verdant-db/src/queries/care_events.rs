//! Database query functions for the `care_events` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::CareEvent;

/// Parameters for inserting a new care event row.
#[derive(Debug, Clone)]
pub struct NewCareEvent {
    pub plant_id: i64,
    pub date: NaiveDate,
    pub care_type: String,
    pub amount: Option<String>,
    pub notes: Option<String>,
}

/// Insert a new care event row. Returns the inserted row with
/// server-generated defaults (id, created_at).
pub async fn insert_care_event(pool: &PgPool, new: &NewCareEvent) -> Result<CareEvent> {
    let event = sqlx::query_as::<_, CareEvent>(
        "INSERT INTO care_events (plant_id, date, care_type, amount, notes) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(new.plant_id)
    .bind(new.date)
    .bind(&new.care_type)
    .bind(&new.amount)
    .bind(&new.notes)
    .fetch_one(pool)
    .await
    .with_context(|| {
        format!(
            "failed to insert {} care event for plant {}",
            new.care_type, new.plant_id
        )
    })?;

    Ok(event)
}

/// Get all care events for a plant, ordered by date ASC then id ASC.
pub async fn list_care_events_for_plant(pool: &PgPool, plant_id: i64) -> Result<Vec<CareEvent>> {
    let events = sqlx::query_as::<_, CareEvent>(
        "SELECT * FROM care_events \
         WHERE plant_id = $1 \
         ORDER BY date ASC, id ASC",
    )
    .bind(plant_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to list care events for plant {plant_id}"))?;

    Ok(events)
}

/// Count the care events recorded for a plant.
pub async fn count_care_events_for_plant(pool: &PgPool, plant_id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM care_events WHERE plant_id = $1")
        .bind(plant_id)
        .fetch_one(pool)
        .await
        .with_context(|| format!("failed to count care events for plant {plant_id}"))?;

    Ok(row.0)
}
