//! Conversation history endpoint.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

/// Query string for `GET /api/conversation/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// GET /api/conversation/{user_id} - most recent stored messages.
pub async fn conversation_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ConversationQuery>,
) -> Json<serde_json::Value> {
    let (messages, total) = state.chat.recent_history(&user_id, query.limit).await;
    Json(json!({
        "conversations": messages,
        "total_messages": total,
    }))
}
