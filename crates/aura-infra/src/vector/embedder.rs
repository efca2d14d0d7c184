//! Local embedding generation using fastembed.
//!
//! Runs the BGESmallENV15 model (384 dimensions) fully in-process via ONNX.
//! `TextEmbedding::embed` takes `&mut self` and is CPU-bound, so the model
//! sits behind a mutex and every call runs on the blocking thread pool.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use aura_core::retrieval::embedder::Embedder;
use aura_types::error::RepositoryError;

use super::schema::EMBEDDING_DIMENSION;

/// Canonical name of the local embedding model.
pub const EMBEDDING_MODEL_NAME: &str = "bge-small-en-v1.5";

/// fastembed-backed implementation of `Embedder`.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Load the embedding model, downloading weights on first use.
    ///
    /// Loading takes a few seconds; construct once at startup and share.
    pub fn new() -> Result<Self, RepositoryError> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::BGESmallENV15).with_show_download_progress(false),
        )
        .map_err(|e| RepositoryError::Query(format!("Failed to load embedding model: {e}")))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl Embedder for FastEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RepositoryError> {
        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().expect("embedding model mutex poisoned");
            model
                .embed(texts, None)
                .map_err(|e| RepositoryError::Query(format!("Embedding failed: {e}")))
        })
        .await
        .map_err(|e| RepositoryError::Query(format!("Embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        EMBEDDING_MODEL_NAME
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION as usize
    }
}
