//! SQLite conversation history store implementation.
//!
//! Implements `HistoryStore` from `aura-core` using sqlx with split
//! read/write pools. Each user's transcript is stored as a single JSON
//! array, so append-plus-trim is one read-modify-write on the serialized
//! writer pool and never races with another turn for the same user.

use chrono::Utc;
use sqlx::Row;

use aura_core::history::retention::RetentionPolicy;
use aura_core::history::store::HistoryStore;
use aura_types::error::RepositoryError;
use aura_types::llm::Message;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryStore`.
pub struct SqliteHistoryStore {
    pool: DatabasePool,
    retention: RetentionPolicy,
}

impl SqliteHistoryStore {
    /// Create a new history store backed by the given database pool.
    pub fn new(pool: DatabasePool, retention: RetentionPolicy) -> Self {
        Self { pool, retention }
    }
}

fn decode_transcript(raw: &str) -> Result<Vec<Message>, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::Serialization(format!("invalid stored transcript: {e}")))
}

fn encode_transcript(messages: &[Message]) -> Result<String, RepositoryError> {
    serde_json::to_string(messages)
        .map_err(|e| RepositoryError::Serialization(format!("failed to encode transcript: {e}")))
}

impl HistoryStore for SqliteHistoryStore {
    async fn history(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let row = sqlx::query("SELECT history FROM conversations WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let raw: String = row
                    .try_get("history")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                decode_transcript(&raw)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn append(&self, user_id: &str, messages: Vec<Message>) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let row = sqlx::query("SELECT history FROM conversations WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut transcript = match row {
            Some(row) => {
                let raw: String = row
                    .try_get("history")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                decode_transcript(&raw)?
            }
            None => Vec::new(),
        };

        transcript.extend(messages);
        self.retention.enforce(&mut transcript);

        let encoded = encode_transcript(&transcript)?;
        sqlx::query(
            r#"INSERT INTO conversations (user_id, history, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT (user_id) DO UPDATE SET history = excluded.history, updated_at = excluded.updated_at"#,
        )
        .bind(user_id)
        .bind(&encoded)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
