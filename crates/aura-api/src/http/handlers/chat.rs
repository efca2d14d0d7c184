//! Chat endpoints: one-shot JSON and word-chunked SSE streaming.

use std::convert::Infallible;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, KeepAlive, Sse};
use chrono::{DateTime, Utc};
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::AppState;

/// Hard cap on inbound message length, in characters.
const MAX_MESSAGE_CHARS: usize = 5000;

/// Delay between streamed word chunks, tuned for a typing effect.
const STREAM_CHUNK_DELAY: Duration = Duration::from_millis(30);

/// Follow-up prompts attached to every non-crisis chat response.
const SUGGESTIONS: [&str; 3] = [
    "Tell me more about how you're feeling",
    "What would help you feel better right now?",
    "Would you like some coping strategies?",
];

/// Request body shared by `/api/chat` and `/api/chat/stream`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
    /// Client-side session marker, accepted but not interpreted.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Opaque client context, accepted but not interpreted.
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

impl ChatRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.user_id.is_empty() {
            return Err(AppError::Validation("user_id must not be empty".into()));
        }
        if self.message.is_empty() {
            return Err(AppError::Validation("message must not be empty".into()));
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AppError::Validation(format!(
                "message must be at most {MAX_MESSAGE_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
    pub suggestions: Option<Vec<String>>,
    pub crisis_detected: bool,
}

impl ChatResponse {
    fn success(reply: String) -> Self {
        Self {
            response: reply,
            status: "success".to_string(),
            message_id: Uuid::now_v7().to_string(),
            timestamp: Utc::now(),
            suggestions: Some(SUGGESTIONS.iter().map(|s| s.to_string()).collect()),
            crisis_detected: false,
        }
    }

    fn crisis(reply: String) -> Self {
        Self {
            response: reply,
            status: "crisis".to_string(),
            message_id: Uuid::now_v7().to_string(),
            timestamp: Utc::now(),
            suggestions: None,
            crisis_detected: true,
        }
    }
}

/// POST /api/chat - run one full chat turn and return the reply.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload?;
    body.validate()?;
    tracing::info!(user_id = %body.user_id, "chat request");

    let outcome = state.chat.respond(&body.user_id, &body.message).await;
    let reply = outcome.reply().to_string();

    let response = if outcome.is_crisis() {
        ChatResponse::crisis(reply)
    } else {
        ChatResponse::success(reply)
    };
    Ok(Json(response))
}

/// POST /api/chat/stream - SSE rendition of one chat turn.
///
/// The turn runs to completion first, then the reply is replayed word by
/// word as `token` events so the frontend can type it out, closing with a
/// `complete` event. Crisis turns emit a single `crisis` event instead.
pub async fn stream_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let Json(body) = payload?;
    body.validate()?;
    tracing::info!(user_id = %body.user_id, "stream chat request");

    let stream = async_stream::stream! {
        let outcome = state.chat.respond(&body.user_id, &body.message).await;

        if outcome.is_crisis() {
            let data = json!({ "content": outcome.reply() });
            yield Ok::<_, Infallible>(Event::default().event("crisis").data(data.to_string()));
            return;
        }

        let words: Vec<String> = outcome
            .reply()
            .split_whitespace()
            .map(|word| format!("{word} "))
            .collect();
        let last = words.len().saturating_sub(1);

        for (index, word) in words.iter().enumerate() {
            let chunk = json!({ "content": word, "is_final": index == last });
            match serde_json::to_string(&chunk) {
                Ok(data) => {
                    yield Ok(Event::default().event("token").data(data));
                }
                Err(err) => {
                    tracing::error!(error = %err, "stream chunk serialization failed");
                    let data = json!({ "content": "Stream interrupted" });
                    yield Ok(Event::default().event("error").data(data.to_string()));
                    return;
                }
            }
            tokio::time::sleep(STREAM_CHUNK_DELAY).await;
        }

        yield Ok(Event::default().event("complete").data("{}"));
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: &str, message: &str) -> ChatRequest {
        ChatRequest {
            user_id: user_id.to_string(),
            message: message.to_string(),
            session_id: None,
            context: None,
        }
    }

    #[test]
    fn test_validate_accepts_normal_message() {
        assert!(request("alice", "I feel a bit low today").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_user_id() {
        let err = request("", "hello").validate().err();
        assert!(matches!(err, Some(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_message() {
        assert!(request("alice", "").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_message() {
        let long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(request("alice", &long).validate().is_err());
        let max = "a".repeat(MAX_MESSAGE_CHARS);
        assert!(request("alice", &max).validate().is_ok());
    }

    #[test]
    fn test_success_response_carries_suggestions() {
        let response = ChatResponse::success("take a breath".to_string());
        assert_eq!(response.status, "success");
        assert!(!response.crisis_detected);
        assert_eq!(response.suggestions.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_crisis_response_has_no_suggestions() {
        let response = ChatResponse::crisis("please reach out".to_string());
        assert_eq!(response.status, "crisis");
        assert!(response.crisis_detected);
        assert!(response.suggestions.is_none());
    }
}
