//! Chat session and message types, plus the server-to-client event
//! payloads shared between the relay and the WebSocket handlers.
//!
//! A [`ChatSession`] is the durable identity-keyed record of a visitor's
//! conversation. Its `session_key` is the visitor's email when one is
//! known, otherwise the transient id of the connection that opened it.
//! Messages are append-only and totally ordered by append time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a chat message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('visitor', 'automated', 'admin'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Visitor,
    Automated,
    Admin,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Visitor => write!(f, "visitor"),
            Sender::Automated => write!(f, "automated"),
            Sender::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visitor" => Ok(Sender::Visitor),
            "automated" => Ok(Sender::Automated),
            "admin" => Ok(Sender::Admin),
            other => Err(format!("invalid message sender: '{other}'")),
        }
    }
}

/// Durable record of one visitor's conversation.
///
/// At most one live connection is considered current per session
/// (`connection_id`); a reconnect migrates the session to the latest
/// connection. Sessions are never deleted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    /// Stable identity: visitor email when known, else the first
    /// connection's transient id.
    pub session_key: String,
    pub display_name: String,
    pub email: Option<String>,
    /// The currently-connected WebSocket, if any.
    pub connection_id: Option<String>,
    /// While true, automated replies are suppressed for this session.
    pub admin_engaged: bool,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// A single message within a chat session. Appended, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A session together with its full transcript, as broadcast to admin
/// observers in the session list.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

/// Server-to-visitor WebSocket event.
///
/// Sent as JSON text frames tagged by `type`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisitorEvent {
    /// Full prior transcript, delivered on (re)connect before any new
    /// message.
    History { messages: Vec<ChatMessage> },
    /// A single new message (automated reply or admin response).
    Message { sender: Sender, text: String },
}

/// Server-to-admin WebSocket event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdminEvent {
    /// All sessions with transcripts, most recently updated first.
    SessionList { sessions: Vec<SessionSnapshot> },
    /// Live message traffic in some session.
    Message {
        session_key: String,
        sender: Sender,
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_round_trips_through_str() {
        for sender in [Sender::Visitor, Sender::Automated, Sender::Admin] {
            let parsed: Sender = sender.to_string().parse().unwrap();
            assert_eq!(parsed, sender);
        }
    }

    #[test]
    fn sender_rejects_unknown() {
        assert!("robot".parse::<Sender>().is_err());
    }

    #[test]
    fn visitor_event_serializes_tagged() {
        let event = VisitorEvent::Message {
            sender: Sender::Automated,
            text: "Hi!".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["sender"], "automated");
        assert_eq!(json["text"], "Hi!");
    }

    #[test]
    fn session_snapshot_flattens_session_fields() {
        let session = ChatSession {
            id: Uuid::now_v7(),
            session_key: "ada@example.com".to_string(),
            display_name: "Ada".to_string(),
            email: Some("ada@example.com".to_string()),
            connection_id: None,
            admin_engaged: false,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        };
        let snapshot = SessionSnapshot {
            session,
            messages: Vec::new(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["session_key"], "ada@example.com");
        assert!(json["messages"].as_array().unwrap().is_empty());
    }
}
