//! Database query functions for the `contact_messages` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::ContactMessage;

/// Parameters for inserting a new contact message row.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Insert a new contact message row. Returns the inserted row with
/// server-generated defaults (id, is_read, created_at).
pub async fn insert_contact_message(
    pool: &PgPool,
    new: &NewContactMessage,
) -> Result<ContactMessage> {
    let message = sqlx::query_as::<_, ContactMessage>(
        "INSERT INTO contact_messages (name, email, subject, message) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.subject)
    .bind(&new.message)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert contact message from {:?}", new.email))?;

    Ok(message)
}

/// List all contact messages, newest first.
pub async fn list_contact_messages(pool: &PgPool) -> Result<Vec<ContactMessage>> {
    let messages = sqlx::query_as::<_, ContactMessage>(
        "SELECT * FROM contact_messages ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
    .context("failed to list contact messages")?;

    Ok(messages)
}

/// Mark a contact message as read. Returns whether a row was updated.
pub async fn mark_message_read(pool: &PgPool, id: i64) -> Result<bool> {
    let result = sqlx::query("UPDATE contact_messages SET is_read = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to mark contact message read")?;

    Ok(result.rows_affected() > 0)
}

/// Delete a contact message. Returns whether a row was deleted.
pub async fn delete_contact_message(pool: &PgPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete contact message")?;

    Ok(result.rows_affected() > 0)
}

/// Count unread contact messages.
pub async fn count_unread(pool: &PgPool) -> Result<i64> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM contact_messages WHERE is_read = FALSE")
            .fetch_one(pool)
            .await
            .context("failed to count unread contact messages")?;

    Ok(row.0)
}
