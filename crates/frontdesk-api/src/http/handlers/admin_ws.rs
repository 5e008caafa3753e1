//! Admin console WebSocket handler.
//!
//! The `/ws/admin` endpoint subscribes a console to the relay's
//! observer broadcast: live message traffic in every session plus
//! refreshed session lists. Commands let the console pull the current
//! session list, engage and release individual sessions, and reply to
//! visitors.
//!
//! Lagged receivers (a console too slow to keep up) are handled
//! gracefully: the handler logs a warning and keeps receiving.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use frontdesk_types::chat::AdminEvent;

use crate::state::AppState;

/// Incoming command from an admin console.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AdminCommand {
    /// Request the full session list with transcripts.
    Observe,
    /// Engage a session: automated replies stop while engaged.
    JoinSession { session_key: String },
    /// Release a session back to the automated responder.
    LeaveSession { session_key: String },
    /// Send an admin reply into a session.
    Message { session_key: String, text: String },
    /// Keep-alive ping. Server responds with `{"type":"pong"}`.
    Ping,
}

/// Upgrade an HTTP request to an admin console WebSocket.
///
/// This is mounted at `/ws/admin` in the router.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let mut event_rx = state.relay.subscribe_admins();

    let (mut ws_sender, mut ws_receiver) = socket.split();

    loop {
        tokio::select! {
            // --- Branch 1: Forward relay broadcasts to the console ---
            event_result = event_rx.recv() => {
                match event_result {
                    Ok(event) => {
                        if send_event(&mut ws_sender, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            skipped = n,
                            "admin WebSocket subscriber lagged, skipping {n} events"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // Relay dropped (server shutting down)
                        break;
                    }
                }
            }

            // --- Branch 2: Process commands from the console ---
            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        process_command(&text, &state, &mut ws_sender).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::debug!("admin WebSocket closed");
}

/// Serialize one event to the console. An error means disconnect.
async fn send_event(
    ws_sender: &mut (impl SinkExt<Message, Error = axum::Error> + Unpin),
    event: &AdminEvent,
) -> Result<(), ()> {
    match serde_json::to_string(event) {
        Ok(json) => ws_sender
            .send(Message::Text(json.into()))
            .await
            .map_err(|_| ()),
        Err(err) => {
            tracing::warn!("Failed to serialize AdminEvent: {err}");
            Ok(())
        }
    }
}

/// Parse and process a single command from the console.
async fn process_command(
    text: &str,
    state: &AppState,
    ws_sender: &mut (impl SinkExt<Message, Error = axum::Error> + Unpin),
) {
    let cmd: AdminCommand = match serde_json::from_str(text) {
        Ok(cmd) => cmd,
        Err(err) => {
            tracing::warn!(
                raw = %text,
                error = %err,
                "Ignoring malformed admin WebSocket command"
            );
            return;
        }
    };

    match cmd {
        AdminCommand::Observe => match state.relay.session_snapshots().await {
            Ok(sessions) => {
                let event = AdminEvent::SessionList { sessions };
                let _ = send_event(ws_sender, &event).await;
            }
            Err(err) => {
                tracing::error!("session list failed: {err}");
            }
        },
        AdminCommand::JoinSession { session_key } => {
            if let Err(err) = state.relay.admin_join(&session_key).await {
                tracing::warn!(%session_key, "admin join failed: {err}");
            }
        }
        AdminCommand::LeaveSession { session_key } => {
            if let Err(err) = state.relay.admin_leave(&session_key).await {
                tracing::warn!(%session_key, "admin leave failed: {err}");
            }
        }
        AdminCommand::Message { session_key, text } => {
            if text.trim().is_empty() {
                return;
            }
            if let Err(err) = state.relay.admin_message(&session_key, text).await {
                tracing::warn!(%session_key, "admin message failed: {err}");
            }
        }
        AdminCommand::Ping => {
            let pong = r#"{"type":"pong"}"#;
            if ws_sender.send(Message::Text(pong.into())).await.is_err() {
                tracing::debug!("Failed to send pong (client disconnecting)");
            }
        }
    }
}
