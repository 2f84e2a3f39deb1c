use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::{MemoryStore, PgStore};

/// One question/answer pair of a chat session. Persisted so that the
/// conversation can be replayed as context on the next question.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: String,
    pub message: String,
    pub response: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn insert(&self, message: &ChatMessage) -> anyhow::Result<()>;
    /// Ascending by timestamp, bounded by `limit`.
    async fn history(&self, session_id: &str, limit: i64) -> anyhow::Result<Vec<ChatMessage>>;
}

#[async_trait]
impl ChatStore for PgStore {
    async fn insert(&self, message: &ChatMessage) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, session_id, message, response, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(&message.session_id)
        .bind(&message.message)
        .bind(&message.response)
        .bind(message.timestamp)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn history(&self, session_id: &str, limit: i64) -> anyhow::Result<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, session_id, message, response, timestamp
            FROM chat_messages
            WHERE session_id = $1
            ORDER BY timestamp ASC
            LIMIT $2
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn insert(&self, message: &ChatMessage) -> anyhow::Result<()> {
        self.chats.lock().expect("lock").push(message.clone());
        Ok(())
    }

    async fn history(&self, session_id: &str, limit: i64) -> anyhow::Result<Vec<ChatMessage>> {
        let chats = self.chats.lock().expect("lock");
        let mut rows: Vec<ChatMessage> = chats
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.timestamp);
        rows.truncate(limit as usize);
        Ok(rows)
    }
}
