use chrono::Utc;
use sqlx::SqlitePool;

use crate::llm_client::ChatMessage;

/// Messages of a session prepended to every new turn.
pub const HISTORY_LIMIT: i64 = 20;

/// Returns the last `limit` messages of the session, oldest first.
pub async fn load_history(
    pool: &SqlitePool,
    session_id: &str,
    limit: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        r#"
        SELECT role, content FROM (
            SELECT id, role, content FROM chat_messages
            WHERE session_id = ?
            ORDER BY id DESC
            LIMIT ?
        )
        ORDER BY id ASC
        "#,
    )
    .bind(session_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(role, content)| match role.as_str() {
            "assistant" => ChatMessage::assistant(&content),
            _ => ChatMessage::user(&content),
        })
        .collect())
}

pub async fn append_message(
    pool: &SqlitePool,
    session_id: &str,
    role: &str,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO chat_messages (session_id, role, content, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(session_id)
    .bind(role)
    .bind(content)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}
