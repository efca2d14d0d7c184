//! Application state wiring all services together.
//!
//! AppState pins the generic service layer to the concrete infra
//! implementations selected by configuration: SQLite or in-process history,
//! the LanceDB knowledge index with local embeddings, and the Gemini
//! provider when an API key is present.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use aura_core::chat::prompt::PromptBuilder;
use aura_core::chat::service::ChatService;
use aura_core::history::box_store::BoxHistoryStore;
use aura_core::history::retention::RetentionPolicy;
use aura_core::llm::box_provider::BoxLlmProvider;
use aura_core::retrieval::box_embedder::BoxEmbedder;
use aura_core::retrieval::box_index::BoxKnowledgeIndex;
use aura_core::retrieval::corpus::wellness_corpus;
use aura_core::retrieval::knowledge::KnowledgeBase;
use aura_infra::config::{gemini_api_key, load_service_config, resolve_data_dir};
use aura_infra::history::MemoryHistoryStore;
use aura_infra::llm::OpenAiCompatibleProvider;
use aura_infra::sqlite::history::SqliteHistoryStore;
use aura_infra::sqlite::pool::{database_url, DatabasePool};
use aura_infra::vector::embedder::EMBEDDING_MODEL_NAME;
use aura_infra::vector::{FastEmbedder, LanceKnowledgeIndex, LanceVectorStore};
use aura_types::config::{HistoryBackend, ServiceConfig};

use crate::http::session::SessionRegistry;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub chat: Arc<ChatService>,
    pub knowledge: Option<Arc<KnowledgeBase>>,
    pub sessions: Arc<SessionRegistry>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, connect stores, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_service_config(&data_dir).await;
        tracing::info!(
            project = %config.cloud.project,
            location = %config.cloud.location,
            model = %config.generation.model,
            backend = %config.memory.backend,
            "starting Aura"
        );

        let retention = RetentionPolicy::new(
            config.memory.retention_ceiling,
            config.memory.retention_floor,
        );

        let history = match config.memory.backend {
            HistoryBackend::Sqlite => {
                let pool = DatabasePool::new(&database_url(&data_dir)).await?;
                BoxHistoryStore::new(SqliteHistoryStore::new(pool, retention))
            }
            HistoryBackend::Memory => BoxHistoryStore::new(MemoryHistoryStore::new(retention)),
        };

        let provider = match gemini_api_key() {
            Some(key) => Some(BoxLlmProvider::new(OpenAiCompatibleProvider::gemini(
                key,
                &config.generation.model,
            ))),
            None => {
                tracing::warn!("GEMINI_API_KEY not set, chat will serve fallback replies");
                None
            }
        };

        let knowledge = if config.retrieval.enabled {
            match build_knowledge_base(&data_dir, config.retrieval.top_k).await {
                Ok(kb) => Some(Arc::new(kb)),
                Err(err) => {
                    tracing::warn!(error = %err, "knowledge base unavailable, continuing without retrieval");
                    None
                }
            }
        } else {
            None
        };

        if let Some(kb) = &knowledge {
            if let Err(err) = kb.ensure_seeded().await {
                tracing::warn!(error = %err, "knowledge seeding failed, retrieval may return nothing");
            }
        }

        let prompt = PromptBuilder::new(&config.generation.model)
            .with_temperature(config.generation.temperature)
            .with_max_tokens(config.generation.max_tokens)
            .with_history_window(config.memory.history_window);

        let chat = ChatService::new(history, provider, knowledge.clone(), prompt);

        Ok(Self {
            config: Arc::new(config),
            chat: Arc::new(chat),
            knowledge,
            sessions: Arc::new(SessionRegistry::new()),
            data_dir,
        })
    }

    /// Embed and index the wellness corpus, returning the indexed count.
    ///
    /// `init` already seeds on startup; the `seed` subcommand uses this for
    /// an explicit one-shot run.
    pub async fn seed_knowledge(&self) -> anyhow::Result<u64> {
        match &self.knowledge {
            Some(kb) => Ok(kb.ensure_seeded().await?),
            None => anyhow::bail!("knowledge base is disabled or unavailable"),
        }
    }
}

async fn build_knowledge_base(data_dir: &Path, top_k: usize) -> anyhow::Result<KnowledgeBase> {
    let embedder = FastEmbedder::new()?;
    let store = LanceVectorStore::new(data_dir.join("knowledge")).await?;
    let index = LanceKnowledgeIndex::new(store, EMBEDDING_MODEL_NAME);

    Ok(KnowledgeBase::new(
        BoxEmbedder::new(embedder),
        BoxKnowledgeIndex::new(index),
        wellness_corpus(),
        top_k,
    ))
}

#[cfg(test)]
impl AppState {
    /// State with an injected chat service for handler tests.
    ///
    /// No provider, no knowledge base, in-process history.
    pub(crate) fn for_tests(chat: ChatService) -> Self {
        Self {
            config: Arc::new(ServiceConfig::default()),
            chat: Arc::new(chat),
            knowledge: None,
            sessions: Arc::new(SessionRegistry::new()),
            data_dir: std::env::temp_dir(),
        }
    }
}
