//! Service descriptor and health endpoints.

use axum::Json;
use serde_json::json;

/// GET / - service descriptor for the demo frontend.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Aura AI Wellness Assistant",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "chat": "/api/chat",
            "stream": "/api/chat/stream",
            "websocket": "/api/ws/{user_id}",
            "health": "/api/health",
            "mood": "/api/mood",
        },
    }))
}

/// GET /api/health - liveness check.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Aura AI Wellness Assistant is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
