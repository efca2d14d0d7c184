//! WebSocket chat channel.
//!
//! `GET /api/ws/{user_id}` upgrades to a WebSocket. Inbound text frames
//! carry `{"message": "..."}`; each one runs a full chat turn and the reply
//! comes back as a JSON frame through the session registry. Malformed
//! frames produce an error frame but leave the socket open.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;

use crate::state::AppState;

/// Inbound chat frame from a WebSocket client.
#[derive(Debug, Deserialize)]
struct WsChatFrame {
    message: String,
}

/// GET /api/ws/{user_id} - upgrade to the chat WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state, user_id))
}

/// Connection loop. Multiplexes between outbound frames queued on the
/// session registry and inbound messages from the client.
async fn handle_connection(socket: WebSocket, state: AppState, user_id: String) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut outbound) = mpsc::unbounded_channel();
    let conn_id = state.sessions.register(&user_id, tx);
    tracing::info!(user_id = %user_id, "WebSocket connected");

    loop {
        tokio::select! {
            frame = outbound.recv() => {
                match frame {
                    Some(frame) => {
                        if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            inbound = ws_receiver.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        process_frame(&state, &user_id, &text).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(user_id = %user_id, error = %err, "WebSocket receive error");
                        break;
                    }
                    // Ping and pong are answered by the protocol layer.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.sessions.remove_if_owner(&user_id, conn_id);
    tracing::info!(user_id = %user_id, "WebSocket disconnected");
}

/// Run one chat turn for an inbound frame, queueing the reply frame.
async fn process_frame(state: &AppState, user_id: &str, text: &str) {
    let frame: WsChatFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(err) => {
            tracing::warn!(user_id = %user_id, error = %err, "malformed WebSocket frame");
            let error = json!({
                "type": "error",
                "content": "Invalid message format",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            });
            state.sessions.send_to(user_id, error.to_string());
            return;
        }
    };

    let outcome = state.chat.respond(user_id, &frame.message).await;
    let kind = if outcome.is_crisis() { "crisis" } else { "response" };
    let reply = json!({
        "type": kind,
        "content": outcome.reply(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if !state.sessions.send_to(user_id, reply.to_string()) {
        tracing::debug!(user_id = %user_id, "reply dropped, no live connection");
    }
}
