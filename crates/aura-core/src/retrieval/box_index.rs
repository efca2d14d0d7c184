//! BoxKnowledgeIndex -- object-safe dynamic dispatch wrapper for
//! KnowledgeIndex.
//!
//! Same blanket-impl pattern as `BoxEmbedder`.

use std::future::Future;
use std::pin::Pin;

use aura_types::error::RepositoryError;
use aura_types::knowledge::KnowledgeDocument;

use super::index::KnowledgeIndex;

/// Object-safe version of [`KnowledgeIndex`] with boxed futures.
pub trait KnowledgeIndexDyn: Send + Sync {
    fn add_boxed<'a>(
        &'a self,
        documents: &'a [KnowledgeDocument],
        vectors: &'a [Vec<f32>],
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>>;

    fn search_boxed<'a>(
        &'a self,
        vector: &'a [f32],
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, RepositoryError>> + Send + 'a>>;

    fn count_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<u64, RepositoryError>> + Send + 'a>>;
}

/// Blanket implementation: any `KnowledgeIndex` automatically implements
/// `KnowledgeIndexDyn`.
impl<T: KnowledgeIndex> KnowledgeIndexDyn for T {
    fn add_boxed<'a>(
        &'a self,
        documents: &'a [KnowledgeDocument],
        vectors: &'a [Vec<f32>],
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>> {
        Box::pin(self.add(documents, vectors))
    }

    fn search_boxed<'a>(
        &'a self,
        vector: &'a [f32],
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, RepositoryError>> + Send + 'a>> {
        Box::pin(self.search(vector, limit))
    }

    fn count_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<u64, RepositoryError>> + Send + 'a>> {
        Box::pin(self.count())
    }
}

/// Type-erased knowledge index for runtime selection.
pub struct BoxKnowledgeIndex {
    inner: Box<dyn KnowledgeIndexDyn + Send + Sync>,
}

impl BoxKnowledgeIndex {
    /// Wrap a concrete `KnowledgeIndex` in a type-erased box.
    pub fn new<T: KnowledgeIndex + 'static>(index: T) -> Self {
        Self {
            inner: Box::new(index),
        }
    }

    /// Add documents with their embedding vectors to the index.
    pub async fn add(
        &self,
        documents: &[KnowledgeDocument],
        vectors: &[Vec<f32>],
    ) -> Result<(), RepositoryError> {
        self.inner.add_boxed(documents, vectors).await
    }

    /// Texts of the nearest documents for a query vector, best match first.
    pub async fn search(
        &self,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<String>, RepositoryError> {
        self.inner.search_boxed(vector, limit).await
    }

    /// Number of documents currently indexed.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        self.inner.count_boxed().await
    }
}
