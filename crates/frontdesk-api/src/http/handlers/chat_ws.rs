//! Visitor WebSocket handler for live chat.
//!
//! The `/ws/chat` endpoint upgrades an HTTP connection to a WebSocket.
//! Each connection gets a fresh transient connection id and an outbox on
//! the relay; the handler then:
//!
//! - **Forwards events:** drains the outbox and pushes every
//!   [`VisitorEvent`] (history, automated replies, admin messages) to
//!   the client as a JSON text frame.
//! - **Receives commands:** parses incoming text frames as
//!   [`VisitorCommand`] and hands them to the relay.
//!
//! Malformed frames are logged and ignored; they never terminate the
//! connection. Disconnecting leaves the session record untouched so the
//! visitor can reconnect and resume.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::state::AppState;

/// Incoming command from a visitor client.
///
/// Clients send JSON-encoded text frames matching one of these variants.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum VisitorCommand {
    /// Identify (or re-identify) the visitor. Both fields optional;
    /// an anonymous join opens a guest session.
    Join {
        name: Option<String>,
        email: Option<String>,
    },
    /// A chat message from the visitor.
    Message { text: String },
    /// Keep-alive ping. Server responds with `{"type":"pong"}`.
    Ping,
}

/// Upgrade an HTTP request to a visitor chat WebSocket.
///
/// This is mounted at `/ws/chat` in the router.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Core visitor connection handler.
///
/// Uses `tokio::select!` to multiplex between the relay outbox and
/// incoming WebSocket frames in a single task.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::now_v7().to_string();
    let mut outbox = state.relay.register_visitor(&connection_id);

    let (mut ws_sender, mut ws_receiver) = socket.split();

    loop {
        tokio::select! {
            // --- Branch 1: Forward relay events to the visitor ---
            event = outbox.recv() => {
                match event {
                    Some(event) => {
                        match serde_json::to_string(&event) {
                            Ok(json) => {
                                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                                    // Client disconnected
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!("Failed to serialize VisitorEvent: {err}");
                            }
                        }
                    }
                    None => {
                        // Outbox replaced (duplicate connection id) or relay dropped
                        break;
                    }
                }
            }

            // --- Branch 2: Process commands from the visitor ---
            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        process_command(&text, &connection_id, &state, &mut ws_sender).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        // Client disconnected
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.relay.unregister_visitor(&connection_id);
    tracing::debug!(%connection_id, "visitor WebSocket closed");
}

/// Parse and process a single command from the visitor.
async fn process_command(
    text: &str,
    connection_id: &str,
    state: &AppState,
    ws_sender: &mut (impl SinkExt<Message, Error = axum::Error> + Unpin),
) {
    let cmd: VisitorCommand = match serde_json::from_str(text) {
        Ok(cmd) => cmd,
        Err(err) => {
            tracing::warn!(
                raw = %text,
                error = %err,
                "Ignoring malformed visitor WebSocket command"
            );
            return;
        }
    };

    match cmd {
        VisitorCommand::Join { name, email } => {
            if let Err(err) = state.relay.visitor_join(connection_id, name, email).await {
                tracing::error!(%connection_id, "visitor join failed: {err}");
            }
        }
        VisitorCommand::Message { text } => {
            if text.trim().is_empty() {
                return;
            }
            if let Err(err) = state.relay.visitor_message(connection_id, text).await {
                tracing::error!(%connection_id, "visitor message failed: {err}");
            }
        }
        VisitorCommand::Ping => {
            let pong = r#"{"type":"pong"}"#;
            if ws_sender.send(Message::Text(pong.into())).await.is_err() {
                tracing::debug!("Failed to send pong (client disconnecting)");
            }
        }
    }
}
