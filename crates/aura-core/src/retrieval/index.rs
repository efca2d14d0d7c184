//! KnowledgeIndex trait for vector similarity search.
//!
//! Implementations (LanceDB-backed) live in aura-infra.

use aura_types::error::RepositoryError;
use aura_types::knowledge::KnowledgeDocument;

/// Vector index port for the knowledge base.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KnowledgeIndex: Send + Sync {
    /// Add documents with their embedding vectors to the index.
    ///
    /// `documents` and `vectors` are parallel slices; callers guarantee
    /// equal length.
    fn add(
        &self,
        documents: &[KnowledgeDocument],
        vectors: &[Vec<f32>],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Texts of the nearest documents for a query vector, best match first.
    fn search(
        &self,
        vector: &[f32],
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;

    /// Number of documents currently indexed.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
