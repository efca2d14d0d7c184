//! HTTP/WebSocket API layer for Aura.
//!
//! Axum-based REST API under `/api/` with SSE streaming, a WebSocket chat
//! channel, and CORS support for the demo frontend.

pub mod error;
pub mod handlers;
pub mod router;
pub mod session;
