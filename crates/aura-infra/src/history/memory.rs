//! In-process conversation history store.
//!
//! Backed by a `DashMap` keyed on user id. Transcripts do not survive a
//! restart; this backend exists for demos and tests where durability does
//! not matter.

use dashmap::DashMap;

use aura_core::history::retention::RetentionPolicy;
use aura_core::history::store::HistoryStore;
use aura_types::error::RepositoryError;
use aura_types::llm::Message;

/// Volatile history store keyed by user id.
pub struct MemoryHistoryStore {
    conversations: DashMap<String, Vec<Message>>,
    retention: RetentionPolicy,
}

impl MemoryHistoryStore {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            conversations: DashMap::new(),
            retention,
        }
    }

    /// Number of users with at least one stored message.
    pub fn user_count(&self) -> usize {
        self.conversations.len()
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new(RetentionPolicy::default())
    }
}

impl HistoryStore for MemoryHistoryStore {
    async fn history(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError> {
        Ok(self
            .conversations
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn append(&self, user_id: &str, messages: Vec<Message>) -> Result<(), RepositoryError> {
        let mut entry = self.conversations.entry(user_id.to_string()).or_default();
        entry.value_mut().extend(messages);
        self.retention.enforce(entry.value_mut());
        Ok(())
    }
}
