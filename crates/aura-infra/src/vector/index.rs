//! LanceDB-backed knowledge index for wellness document retrieval.
//!
//! Implements `KnowledgeIndex` from `aura-core` using a single LanceDB
//! table with 384-dimensional BGESmallENV15 embeddings and cosine
//! distance search.

use std::sync::Arc;

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, Int32Array, RecordBatch, RecordBatchIterator,
    StringArray,
};
use arrow_schema::{DataType, Field};
use futures_util::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};

use aura_core::retrieval::index::KnowledgeIndex;
use aura_types::error::RepositoryError;
use aura_types::knowledge::KnowledgeDocument;

use super::lance::LanceVectorStore;
use super::schema::{knowledge_schema, EMBEDDING_DIMENSION, KNOWLEDGE_TABLE};

/// LanceDB-backed implementation of `KnowledgeIndex`.
pub struct LanceKnowledgeIndex {
    store: LanceVectorStore,
    embedding_model: String,
}

impl LanceKnowledgeIndex {
    /// Create a new index over the given store.
    ///
    /// `embedding_model` is recorded alongside each row so a future model
    /// change can detect rows that need re-embedding.
    pub fn new(store: LanceVectorStore, embedding_model: impl Into<String>) -> Self {
        Self {
            store,
            embedding_model: embedding_model.into(),
        }
    }

    async fn ensure_knowledge_table(&self) -> Result<lancedb::Table, RepositoryError> {
        let schema = Arc::new(knowledge_schema());
        self.store
            .ensure_table(KNOWLEDGE_TABLE, schema)
            .await
            .map_err(|e| RepositoryError::Query(format!("Failed to ensure knowledge table: {e}")))
    }

    /// Build an Arrow RecordBatch from parallel document and vector slices.
    fn build_record_batch(
        &self,
        documents: &[KnowledgeDocument],
        vectors: &[Vec<f32>],
    ) -> Result<RecordBatch, RepositoryError> {
        let schema = Arc::new(knowledge_schema());

        let id_array = Int32Array::from(documents.iter().map(|d| d.id).collect::<Vec<i32>>());
        let text_array =
            StringArray::from(documents.iter().map(|d| d.text.clone()).collect::<Vec<String>>());
        let model_array = StringArray::from(vec![self.embedding_model.clone(); documents.len()]);

        // Build FixedSizeList vector column
        let values = Float32Array::from(vectors.iter().flatten().copied().collect::<Vec<f32>>());
        let field = Arc::new(Field::new("item", DataType::Float32, true));
        let vector_array = FixedSizeListArray::new(field, EMBEDDING_DIMENSION, Arc::new(values), None);

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(id_array),
                Arc::new(text_array),
                Arc::new(model_array),
                Arc::new(vector_array),
            ],
        )
        .map_err(|e| RepositoryError::Query(format!("Failed to build record batch: {e}")))
    }
}

impl KnowledgeIndex for LanceKnowledgeIndex {
    async fn add(
        &self,
        documents: &[KnowledgeDocument],
        vectors: &[Vec<f32>],
    ) -> Result<(), RepositoryError> {
        if documents.is_empty() {
            return Ok(());
        }
        if documents.len() != vectors.len() {
            return Err(RepositoryError::Query(format!(
                "mismatched document and vector counts: {} documents, {} vectors",
                documents.len(),
                vectors.len()
            )));
        }

        let table = self.ensure_knowledge_table().await?;
        let batch = self.build_record_batch(documents, vectors)?;
        let schema = batch.schema();

        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        table
            .add(reader)
            .execute()
            .await
            .map_err(|e| RepositoryError::Query(format!("Failed to add documents: {e}")))?;

        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<String>, RepositoryError> {
        if !self.store.table_exists(KNOWLEDGE_TABLE).await {
            return Ok(Vec::new());
        }
        let table = self.ensure_knowledge_table().await?;

        // Use cosine distance for semantic search
        let results = table
            .vector_search(vector)
            .map_err(|e| RepositoryError::Query(format!("Vector search setup failed: {e}")))?
            .distance_type(lancedb::DistanceType::Cosine)
            .limit(limit)
            .execute()
            .await
            .map_err(|e| RepositoryError::Query(format!("Vector search failed: {e}")))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(|e| RepositoryError::Query(format!("Failed to collect results: {e}")))?;

        // Batches arrive ordered by ascending distance
        let mut texts = Vec::new();
        for batch in &batches {
            if batch.num_rows() == 0 {
                continue;
            }
            let text_col = batch
                .column_by_name("text")
                .and_then(|c| c.as_any().downcast_ref::<StringArray>())
                .ok_or_else(|| {
                    RepositoryError::Query("text column missing from search results".to_string())
                })?;
            for i in 0..batch.num_rows() {
                texts.push(text_col.value(i).to_string());
            }
        }

        Ok(texts)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        if !self.store.table_exists(KNOWLEDGE_TABLE).await {
            return Ok(0);
        }
        let table = self.ensure_knowledge_table().await?;

        let count = table
            .count_rows(None)
            .await
            .map_err(|e| RepositoryError::Query(format!("Failed to count documents: {e}")))?;

        Ok(count as u64)
    }
}
