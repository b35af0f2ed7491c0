//! Database query functions for the `garden_plants` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::{GardenPlant, PlantCategory, PlantStatus};

/// Parameters for inserting a new garden plant row.
#[derive(Debug, Clone)]
pub struct NewGardenPlant {
    pub nickname: Option<String>,
    pub plant_name: String,
    pub scientific_name: Option<String>,
    pub category: PlantCategory,
    pub variety: Option<String>,
    pub source: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

/// Filters for listing garden plants. `None` fields match everything;
/// `search` is a case-insensitive substring over nickname, plant name,
/// variety and location.
#[derive(Debug, Clone, Default)]
pub struct GardenPlantFilter {
    pub status: Option<PlantStatus>,
    pub category: Option<PlantCategory>,
    pub search: Option<String>,
}

/// Insert a new garden plant row. Returns the inserted plant with
/// server-generated defaults (id, status, created_at).
pub async fn insert_garden_plant(pool: &PgPool, new: &NewGardenPlant) -> Result<GardenPlant> {
    let plant = sqlx::query_as::<_, GardenPlant>(
        "INSERT INTO garden_plants \
             (nickname, plant_name, scientific_name, category, variety, \
              source, planting_date, location, image_url, notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING *",
    )
    .bind(&new.nickname)
    .bind(&new.plant_name)
    .bind(&new.scientific_name)
    .bind(new.category)
    .bind(&new.variety)
    .bind(&new.source)
    .bind(new.planting_date)
    .bind(&new.location)
    .bind(&new.image_url)
    .bind(&new.notes)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert garden plant {:?}", new.plant_name))?;

    Ok(plant)
}

/// Fetch a garden plant by its ID.
pub async fn get_garden_plant(pool: &PgPool, id: i64) -> Result<Option<GardenPlant>> {
    let plant = sqlx::query_as::<_, GardenPlant>("SELECT * FROM garden_plants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch garden plant")?;

    Ok(plant)
}

/// List garden plants matching the filter, newest first.
pub async fn list_garden_plants(
    pool: &PgPool,
    filter: &GardenPlantFilter,
) -> Result<Vec<GardenPlant>> {
    let pattern = filter.search.as_ref().map(|q| format!("%{q}%"));

    let plants = sqlx::query_as::<_, GardenPlant>(
        "SELECT * FROM garden_plants \
         WHERE ($1::text IS NULL OR status = $1) \
           AND ($2::text IS NULL OR category = $2) \
           AND ($3::text IS NULL \
                OR nickname ILIKE $3 \
                OR plant_name ILIKE $3 \
                OR variety ILIKE $3 \
                OR location ILIKE $3) \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(filter.status.map(|s| s.to_string()))
    .bind(filter.category.map(|c| c.to_string()))
    .bind(pattern)
    .fetch_all(pool)
    .await
    .context("failed to list garden plants")?;

    Ok(plants)
}

/// Update the status of a garden plant.
pub async fn update_garden_plant_status(
    pool: &PgPool,
    id: i64,
    status: PlantStatus,
) -> Result<()> {
    let result = sqlx::query("UPDATE garden_plants SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update garden plant status")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("garden plant {id} not found");
    }

    Ok(())
}

/// Delete a garden plant. Child observations, care events and harvests are
/// removed by the cascade. Returns whether a row was deleted.
pub async fn delete_garden_plant(pool: &PgPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM garden_plants WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete garden plant")?;

    Ok(result.rows_affected() > 0)
}

/// Count all garden plants.
pub async fn count_garden_plants(pool: &PgPool) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM garden_plants")
        .fetch_one(pool)
        .await
        .context("failed to count garden plants")?;

    Ok(row.0)
}

/// Of the given IDs, return those that exist, in ascending order.
///
/// The bulk quick-action endpoints use this to skip stale IDs instead of
/// failing the whole batch.
pub async fn filter_existing_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<i64>> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT id FROM garden_plants WHERE id = ANY($1) ORDER BY id",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
    .context("failed to filter garden plant ids")?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
