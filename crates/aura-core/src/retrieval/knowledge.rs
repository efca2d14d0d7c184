//! KnowledgeBase -- retrieval over the wellness corpus.
//!
//! Wraps an embedder and a vector index behind two operations: seeding the
//! fixed corpus at startup and producing a context block for one query.
//! Retrieval is strictly best-effort; every failure degrades to an empty
//! context so a chat turn can always proceed.

use aura_types::error::RepositoryError;
use aura_types::knowledge::KnowledgeDocument;

use super::box_embedder::BoxEmbedder;
use super::box_index::BoxKnowledgeIndex;

/// Retrieval layer over the wellness corpus.
pub struct KnowledgeBase {
    embedder: BoxEmbedder,
    index: BoxKnowledgeIndex,
    corpus: Vec<KnowledgeDocument>,
    top_k: usize,
}

impl KnowledgeBase {
    pub fn new(
        embedder: BoxEmbedder,
        index: BoxKnowledgeIndex,
        corpus: Vec<KnowledgeDocument>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            corpus,
            top_k,
        }
    }

    /// Embed and index the corpus if it is not already present.
    ///
    /// Safe to call on every startup: an index that already holds the full
    /// corpus is left untouched. Returns the indexed document count.
    pub async fn ensure_seeded(&self) -> Result<u64, RepositoryError> {
        let indexed = self.index.count().await?;
        if indexed >= self.corpus.len() as u64 {
            tracing::debug!(indexed, "knowledge index already populated, skipping seed");
            return Ok(indexed);
        }

        let texts: Vec<String> = self.corpus.iter().map(|doc| doc.text.clone()).collect();
        let vectors = self.embedder.embed(&texts).await?;
        self.index.add(&self.corpus, &vectors).await?;

        let total = self.index.count().await?;
        tracing::info!(
            documents = total,
            model = self.embedder.model_name(),
            "knowledge index seeded"
        );
        Ok(total)
    }

    /// Context block for a prompt, or an empty string.
    ///
    /// Any failure (embedding, search, empty index) is logged and degrades
    /// to no context rather than failing the chat turn.
    pub async fn context_for(&self, query: &str) -> String {
        match self.retrieve(query).await {
            Ok(block) => block,
            Err(err) => {
                tracing::warn!(error = %err, "knowledge retrieval failed, continuing without context");
                String::new()
            }
        }
    }

    async fn retrieve(&self, query: &str) -> Result<String, RepositoryError> {
        let queries = vec![query.to_string()];
        let vectors = self.embedder.embed(&queries).await?;
        let Some(vector) = vectors.first() else {
            return Ok(String::new());
        };

        let snippets = self.index.search(vector, self.top_k).await?;
        if snippets.is_empty() {
            return Ok(String::new());
        }

        tracing::debug!(retrieved = snippets.len(), "knowledge snippets retrieved");
        Ok(context_block(&snippets))
    }
}

/// Format retrieved snippets as the delimited block prompts expect.
fn context_block(snippets: &[String]) -> String {
    let bullets: Vec<String> = snippets.iter().map(|s| format!("- {s}")).collect();
    format!(
        "\n\n---\nRetrieved Knowledge:\n{}\n---\n",
        bullets.join("\n")
    )
}
