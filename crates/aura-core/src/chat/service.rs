//! ChatService -- the full pipeline for one conversational turn.
//!
//! Every transport (REST, SSE, WebSocket) funnels through `respond`, so
//! crisis handling, retrieval, fallbacks, and history persistence behave
//! identically regardless of how the message arrived.
//!
//! `respond` is deliberately infallible: degraded dependencies produce
//! fallback replies, never errors. A user in distress should not see a 500.

use std::sync::Arc;

use aura_types::llm::Message;

use crate::history::box_store::BoxHistoryStore;
use crate::llm::box_provider::BoxLlmProvider;
use crate::retrieval::knowledge::KnowledgeBase;
use crate::safety::crisis::CrisisPolicy;
use crate::safety::moderation::{AlwaysSafe, ModerationPolicy, ModerationVerdict, REDIRECT_REPLY};

use super::prompt::PromptBuilder;

/// Reply used when the provider errors mid-request.
pub const GENERATION_FALLBACK: &str =
    "I'm having trouble processing that right now. Could you try rephrasing your question?";

/// Reply used when no provider is configured at all.
pub const UNAVAILABLE_FALLBACK: &str =
    "I'm currently experiencing technical difficulties. Please try again later.";

/// Outcome of one turn of the chat pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// A normal assistant reply.
    Reply(String),
    /// Crisis language was detected; the reply is the escalation message.
    Crisis(String),
}

impl ChatOutcome {
    pub fn reply(&self) -> &str {
        match self {
            ChatOutcome::Reply(reply) | ChatOutcome::Crisis(reply) => reply,
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, ChatOutcome::Crisis(_))
    }
}

/// Runs one turn: crisis screen, recall, retrieval, generation, moderation,
/// persistence.
pub struct ChatService {
    history: BoxHistoryStore,
    provider: Option<BoxLlmProvider>,
    knowledge: Option<Arc<KnowledgeBase>>,
    prompt: PromptBuilder,
    crisis: CrisisPolicy,
    moderation: Arc<dyn ModerationPolicy>,
}

impl ChatService {
    /// Service with the default crisis keywords and pass-through moderation.
    ///
    /// `provider` is optional so the service can come up without
    /// credentials and serve static fallback replies.
    pub fn new(
        history: BoxHistoryStore,
        provider: Option<BoxLlmProvider>,
        knowledge: Option<Arc<KnowledgeBase>>,
        prompt: PromptBuilder,
    ) -> Self {
        Self {
            history,
            provider,
            knowledge,
            prompt,
            crisis: CrisisPolicy::default(),
            moderation: Arc::new(AlwaysSafe),
        }
    }

    pub fn with_crisis_policy(mut self, crisis: CrisisPolicy) -> Self {
        self.crisis = crisis;
        self
    }

    pub fn with_moderation(mut self, moderation: Arc<dyn ModerationPolicy>) -> Self {
        self.moderation = moderation;
        self
    }

    /// Run the pipeline for one user message.
    ///
    /// Crisis messages short-circuit before any model call. Both the user
    /// message and the final reply (escalation included) are appended to
    /// history, so transcripts read the same across transports.
    pub async fn respond(&self, user_id: &str, message: &str) -> ChatOutcome {
        if let Some(hit) = self.crisis.screen(message) {
            tracing::warn!(user_id, keyword = hit.keyword(), "crisis language detected, escalating");
            let reply = self.crisis.escalation_message().to_string();
            self.remember(user_id, message, &reply).await;
            return ChatOutcome::Crisis(reply);
        }

        let history = self.recall(user_id).await;
        let retrieved = match &self.knowledge {
            Some(kb) => kb.context_for(message).await,
            None => String::new(),
        };

        let draft = self.generate(&history, &retrieved, message).await;
        let reply = match self.moderation.review(&draft) {
            ModerationVerdict::Safe => draft,
            ModerationVerdict::Flagged => {
                tracing::warn!(user_id, "draft reply flagged by moderation, redirecting");
                REDIRECT_REPLY.to_string()
            }
        };

        self.remember(user_id, message, &reply).await;
        ChatOutcome::Reply(reply)
    }

    /// The most recent `limit` stored messages plus the total stored count.
    pub async fn recent_history(&self, user_id: &str, limit: usize) -> (Vec<Message>, usize) {
        let all = self.recall(user_id).await;
        let total = all.len();
        let start = total.saturating_sub(limit);
        (all[start..].to_vec(), total)
    }

    async fn recall(&self, user_id: &str) -> Vec<Message> {
        match self.history.history(user_id).await {
            Ok(messages) => messages,
            Err(err) => {
                tracing::warn!(user_id, error = %err, "history read failed, continuing with empty transcript");
                Vec::new()
            }
        }
    }

    async fn generate(&self, history: &[Message], retrieved: &str, message: &str) -> String {
        let Some(provider) = &self.provider else {
            tracing::warn!("no provider configured, serving unavailable fallback");
            return UNAVAILABLE_FALLBACK.to_string();
        };

        let request = self.prompt.build(history, retrieved, message);
        match provider.complete(&request).await {
            Ok(response) => {
                tracing::debug!(
                    provider = provider.name(),
                    model = %response.model,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "completion finished"
                );
                response.content.trim().to_string()
            }
            Err(err) => {
                tracing::error!(
                    provider = provider.name(),
                    error = %err,
                    "completion failed, serving fallback reply"
                );
                GENERATION_FALLBACK.to_string()
            }
        }
    }

    async fn remember(&self, user_id: &str, user_message: &str, reply: &str) {
        let turn = vec![Message::user(user_message), Message::assistant(reply)];
        if let Err(err) = self.history.append(user_id, turn).await {
            tracing::warn!(user_id, error = %err, "failed to persist conversation turn");
        }
    }
}
