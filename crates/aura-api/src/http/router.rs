//! Axum router configuration with middleware.
//!
//! All API routes live under `/api/`; middleware is CORS for the demo
//! frontend dev server plus request tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Wildcard origins cannot be combined with credentials, so the demo
    // frontend origins are listed explicitly.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ]))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::service::root))
        .route("/api/health", get(handlers::service::health))
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/chat/stream", post(handlers::chat::stream_chat))
        .route("/api/ws/{user_id}", get(handlers::ws::ws_handler))
        .route("/api/mood", post(handlers::mood::log_mood))
        .route("/api/mood/{user_id}", get(handlers::mood::mood_history))
        .route(
            "/api/conversation/{user_id}",
            get(handlers::conversation::conversation_history),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::chat::prompt::PromptBuilder;
    use aura_core::chat::service::ChatService;
    use aura_core::history::box_store::BoxHistoryStore;
    use aura_core::llm::box_provider::BoxLlmProvider;
    use aura_core::llm::provider::LlmProvider;
    use aura_infra::history::MemoryHistoryStore;
    use aura_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    /// Provider stub that always returns the same reply.
    struct FixedProvider(&'static str);

    impl LlmProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "cmpl-test".to_string(),
                content: self.0.to_string(),
                model: "test-model".to_string(),
                usage: Usage::default(),
            })
        }
    }

    fn test_app(reply: &'static str) -> Router {
        let history = BoxHistoryStore::new(MemoryHistoryStore::default());
        let provider = Some(BoxLlmProvider::new(FixedProvider(reply)));
        let chat = ChatService::new(history, provider, None, PromptBuilder::new("test-model"));
        build_router(AppState::for_tests(chat))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let res = test_app("ok").oneshot(get_request("/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["status"], "running");
        assert_eq!(json["endpoints"]["chat"], "/api/chat");
        assert_eq!(json["endpoints"]["websocket"], "/api/ws/{user_id}");
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let res = test_app("ok")
            .oneshot(get_request("/api/health"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_chat_returns_reply_with_suggestions() {
        let req = json_request(
            "POST",
            "/api/chat",
            json!({"user_id": "alice", "message": "I feel stressed about work"}),
        );
        let res = test_app("Take a slow breath.").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["response"], "Take a slow breath.");
        assert_eq!(json["status"], "success");
        assert_eq!(json["crisis_detected"], false);
        assert_eq!(json["suggestions"].as_array().map(Vec::len), Some(3));
        assert!(json["message_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_chat_crisis_bypasses_provider() {
        let req = json_request(
            "POST",
            "/api/chat",
            json!({"user_id": "alice", "message": "everything feels hopeless"}),
        );
        let res = test_app("SHOULD NOT APPEAR").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["status"], "crisis");
        assert_eq!(json["crisis_detected"], true);
        assert!(json["suggestions"].is_null());
        let reply = json["response"].as_str().unwrap();
        assert!(reply.contains("988"));
        assert!(!reply.contains("SHOULD NOT APPEAR"));
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_user_id() {
        let req = json_request("POST", "/api/chat", json!({"user_id": "", "message": "hi"}));
        let res = test_app("ok").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_body_with_envelope() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from("not json at all"))
            .unwrap();
        let res = test_app("ok").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_rejects_oversized_message() {
        let req = json_request(
            "POST",
            "/api/chat",
            json!({"user_id": "alice", "message": "a".repeat(5001)}),
        );
        let res = test_app("ok").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stream_emits_token_and_complete_events() {
        let req = json_request(
            "POST",
            "/api/chat/stream",
            json!({"user_id": "alice", "message": "any tips for sleep?"}),
        );
        let res = test_app("Keep a steady routine").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/event-stream"));
        let body = body_text(res).await;
        assert!(body.contains("event: token"));
        assert!(body.contains("event: complete"));
        assert!(body.contains("Keep "));
        assert!(body.contains("\"is_final\":true"));
    }

    #[tokio::test]
    async fn test_stream_crisis_emits_single_crisis_event() {
        let req = json_request(
            "POST",
            "/api/chat/stream",
            json!({"user_id": "alice", "message": "I want to die"}),
        );
        let res = test_app("SHOULD NOT APPEAR").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_text(res).await;
        assert!(body.contains("event: crisis"));
        assert!(body.contains("988"));
        assert!(!body.contains("event: token"));
        assert!(!body.contains("event: complete"));
    }

    #[tokio::test]
    async fn test_stream_rejects_invalid_request_before_streaming() {
        let req = json_request(
            "POST",
            "/api/chat/stream",
            json!({"user_id": "alice", "message": ""}),
        );
        let res = test_app("ok").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mood_log_acknowledges_entry() {
        let req = json_request(
            "POST",
            "/api/mood",
            json!({"user_id": "alice", "mood_score": 7, "mood_tags": ["calm"]}),
        );
        let res = test_app("ok").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Mood logged successfully");
        assert!(json["entry_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_mood_log_rejects_out_of_range_score() {
        let req = json_request(
            "POST",
            "/api/mood",
            json!({"user_id": "alice", "mood_score": 11}),
        );
        let res = test_app("ok").oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mood_history_returns_sample_summary() {
        let res = test_app("ok")
            .oneshot(get_request("/api/mood/alice"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["entries"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["average_score"], 6.0);
        assert_eq!(json["trend"], "stable");
        assert_eq!(json["entries"][0]["user_id"], "alice");
    }

    #[tokio::test]
    async fn test_conversation_history_after_chat_turn() {
        let app = test_app("Try a short walk.");
        let req = json_request(
            "POST",
            "/api/chat",
            json!({"user_id": "bob", "message": "I'm restless"}),
        );
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(get_request("/api/conversation/bob"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["total_messages"], 2);
        let messages = json["conversations"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"], "Try a short walk.");
    }

    #[tokio::test]
    async fn test_conversation_history_respects_limit() {
        let app = test_app("noted");
        for i in 0..3 {
            let req = json_request(
                "POST",
                "/api/chat",
                json!({"user_id": "carol", "message": format!("message {i}")}),
            );
            app.clone().oneshot(req).await.unwrap();
        }

        let res = app
            .oneshot(get_request("/api/conversation/carol?limit=2"))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["total_messages"], 6);
        assert_eq!(json["conversations"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["conversations"][1]["content"], "noted");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let res = test_app("ok")
            .oneshot(get_request("/api/nope"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
