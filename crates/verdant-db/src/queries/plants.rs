//! Database query functions for the storefront `plants` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::Plant;

/// Parameters for inserting a new storefront plant row.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
}

/// Insert a new storefront plant row. Returns the inserted plant with
/// server-generated defaults (id, in_stock, created_at).
pub async fn insert_plant(pool: &PgPool, new: &NewPlant) -> Result<Plant> {
    let plant = sqlx::query_as::<_, Plant>(
        "INSERT INTO plants (name, scientific_name, description, price, category, image_url) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(&new.name)
    .bind(&new.scientific_name)
    .bind(&new.description)
    .bind(new.price)
    .bind(&new.category)
    .bind(&new.image_url)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert plant {:?}", new.name))?;

    Ok(plant)
}

/// Fetch a storefront plant by its ID.
pub async fn get_plant(pool: &PgPool, id: i64) -> Result<Option<Plant>> {
    let plant = sqlx::query_as::<_, Plant>("SELECT * FROM plants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch plant")?;

    Ok(plant)
}

/// List in-stock plants for the catalog, ordered by name.
///
/// `category` matches case-insensitively against the stored category string
/// (apply alias normalization before calling). `search` is a
/// case-insensitive substring over name, scientific name and description.
pub async fn list_in_stock(
    pool: &PgPool,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<Vec<Plant>> {
    let pattern = search.map(|q| format!("%{q}%"));

    let plants = sqlx::query_as::<_, Plant>(
        "SELECT * FROM plants \
         WHERE in_stock = TRUE \
           AND ($1::text IS NULL OR LOWER(category) = LOWER($1)) \
           AND ($2::text IS NULL \
                OR name ILIKE $2 \
                OR scientific_name ILIKE $2 \
                OR description ILIKE $2) \
         ORDER BY name ASC",
    )
    .bind(category)
    .bind(pattern)
    .fetch_all(pool)
    .await
    .context("failed to list in-stock plants")?;

    Ok(plants)
}

/// List every plant (admin view), newest first.
pub async fn list_all_plants(pool: &PgPool) -> Result<Vec<Plant>> {
    let plants = sqlx::query_as::<_, Plant>("SELECT * FROM plants ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
        .context("failed to list plants")?;

    Ok(plants)
}

/// The first `limit` in-stock plants, for the landing page.
pub async fn featured_plants(pool: &PgPool, limit: i64) -> Result<Vec<Plant>> {
    let plants = sqlx::query_as::<_, Plant>(
        "SELECT * FROM plants WHERE in_stock = TRUE ORDER BY id ASC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("failed to list featured plants")?;

    Ok(plants)
}

/// Distinct category strings across the catalog, sorted.
pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT category FROM plants ORDER BY category")
            .fetch_all(pool)
            .await
            .context("failed to list distinct categories")?;

    Ok(rows.into_iter().map(|(c,)| c).collect())
}

/// Delete a storefront plant. Returns whether a row was deleted.
pub async fn delete_plant(pool: &PgPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM plants WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete plant")?;

    Ok(result.rows_affected() > 0)
}

/// Count all storefront plants.
pub async fn count_plants(pool: &PgPool) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plants")
        .fetch_one(pool)
        .await
        .context("failed to count plants")?;

    Ok(row.0)
}
