//! HistoryStore trait for per-user conversation persistence.
//!
//! Implementations (in-process map, SQLite) live in aura-infra.

use aura_types::error::RepositoryError;
use aura_types::llm::Message;

/// Per-user conversation transcript port.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations apply a `RetentionPolicy` inside `append` so no caller
/// can grow a transcript without bound.
pub trait HistoryStore: Send + Sync {
    /// Full stored transcript for a user, oldest first.
    ///
    /// Unknown users resolve to an empty transcript, not an error.
    fn history(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Append messages to a user's transcript, then apply retention.
    fn append(
        &self,
        user_id: &str,
        messages: Vec<Message>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
