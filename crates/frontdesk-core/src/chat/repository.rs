//! ChatRepository trait definition.
//!
//! The session store is the only shared mutable resource in the relay;
//! all mutation goes through the lookup/upsert/append operations below.
//! Implementations must make `append_message` a single atomic insert,
//! never a read-modify-write of the session's whole message list.

use frontdesk_types::chat::{ChatMessage, ChatSession};
use frontdesk_types::error::RepositoryError;
use uuid::Uuid;

/// Persistence port for chat sessions and their transcripts.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Create a new session record.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session by its unique id.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Look up a session by visitor email (the stable identity).
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Look up a session by its current connection id.
    fn find_by_connection(
        &self,
        connection_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Look up a session by its stable session key.
    fn find_by_key(
        &self,
        session_key: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Update a session's mutable fields (display name, email,
    /// connection id, engagement flag). Last writer wins on the
    /// connection id.
    fn update_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Toggle the admin-engagement flag for a session key.
    fn set_admin_engaged(
        &self,
        session_key: &str,
        engaged: bool,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a message to its session and refresh the session's
    /// `last_updated`. Must be atomic per message: concurrent appends to
    /// the same session may interleave but never drop a message.
    fn append_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Full transcript of a session, in append order.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// All sessions, most recently updated first.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Count all sessions.
    fn count_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Count all messages across sessions.
    fn count_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
