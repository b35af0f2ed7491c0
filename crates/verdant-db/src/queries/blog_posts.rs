//! Database query functions for the `blog_posts` table.
//!
//! Listing tolerates the table being absent entirely (a freshly created
//! database that has not run the blog migration yet) and degrades to an
//! empty result set instead of failing the page.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::warn;

use crate::models::BlogPost;

/// Parameters for inserting a new blog post row.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub tags: Option<String>,
    pub published: bool,
}

/// PostgreSQL `undefined_table`.
fn is_undefined_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("42P01"),
        _ => false,
    }
}

/// Insert a new blog post row. Returns the inserted row with
/// server-generated defaults (id, created_at).
pub async fn insert_blog_post(pool: &PgPool, new: &NewBlogPost) -> Result<BlogPost> {
    let post = sqlx::query_as::<_, BlogPost>(
        "INSERT INTO blog_posts (title, content, tags, published) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(&new.title)
    .bind(&new.content)
    .bind(&new.tags)
    .bind(new.published)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert blog post {:?}", new.title))?;

    Ok(post)
}

/// List published posts, newest first.
///
/// Returns an empty list when the `blog_posts` table does not exist.
pub async fn list_published(pool: &PgPool) -> Result<Vec<BlogPost>> {
    let result = sqlx::query_as::<_, BlogPost>(
        "SELECT * FROM blog_posts \
         WHERE published = TRUE \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await;

    match result {
        Ok(posts) => Ok(posts),
        Err(err) if is_undefined_table(&err) => {
            warn!("blog_posts table missing; returning empty post list");
            Ok(Vec::new())
        }
        Err(err) => Err(err).context("failed to list published blog posts"),
    }
}

/// Fetch a published post by its ID.
pub async fn get_published(pool: &PgPool, id: i64) -> Result<Option<BlogPost>> {
    let post = sqlx::query_as::<_, BlogPost>(
        "SELECT * FROM blog_posts WHERE id = $1 AND published = TRUE",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("failed to fetch blog post")?;

    Ok(post)
}

/// Count published posts.
pub async fn count_published(pool: &PgPool) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blog_posts WHERE published = TRUE")
        .fetch_one(pool)
        .await
        .context("failed to count published blog posts")?;

    Ok(row.0)
}
