//! Real-time chat relay between visitors, the automated responder, and
//! admin observers.
//!
//! The relay is the runtime hub for live chat. Each visitor WebSocket
//! registers a bounded `mpsc` outbox keyed by its connection id; admin
//! consoles share one `broadcast` channel. All durable state lives in
//! the injected [`ChatRepository`] -- the relay holds no message history
//! of its own and survives nothing across restarts by design.
//!
//! Automated replies are scheduled through a per-session queue with a
//! dedicated worker task, so a later visitor message can never be
//! answered before an earlier one whose reply is still pending. The
//! worker re-reads the session after the delay and drops the reply if an
//! admin engaged mid-delay.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use frontdesk_types::chat::{
    AdminEvent, ChatMessage, ChatSession, Sender, SessionSnapshot, VisitorEvent,
};
use frontdesk_types::config::SiteConfig;
use frontdesk_types::error::RepositoryError;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::chat::auto_reply;
use crate::chat::repository::ChatRepository;
use crate::notify::{Notifier, NotifyKind, client_footer};

/// Buffer size for per-visitor outbox channels (mpsc).
const VISITOR_BUFFER: usize = 64;

/// Buffer size for the admin observer broadcast channel.
const ADMIN_BUFFER: usize = 256;

/// Buffer size for per-session pending-reply queues.
const REPLY_BUFFER: usize = 32;

/// Errors that can occur during relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The target session key does not exist.
    #[error("unknown chat session '{0}'")]
    UnknownSession(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A visitor message waiting for its automated reply.
struct PendingReply {
    text: String,
}

struct Inner<R, N> {
    repo: R,
    notifier: N,
    site: SiteConfig,
    alert_email: Option<String>,
    reply_delay: Duration,
    /// Per-connection visitor outboxes (connection id -> mpsc sender).
    visitors: DashMap<String, mpsc::Sender<VisitorEvent>>,
    /// Fan-out to all currently-connected admin consoles.
    admin_tx: broadcast::Sender<AdminEvent>,
    /// Per-session reply queues (session id -> queue sender). Workers
    /// drain one queue serially, preserving reply order.
    reply_queues: DashMap<Uuid, mpsc::Sender<PendingReply>>,
}

/// Central router for live chat. Cheap to clone; all clones share state.
pub struct Relay<R, N> {
    inner: Arc<Inner<R, N>>,
}

impl<R, N> Clone for Relay<R, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, N> Relay<R, N>
where
    R: ChatRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    /// Create a new relay over the given session store and notifier.
    pub fn new(
        repo: R,
        notifier: N,
        site: SiteConfig,
        alert_email: Option<String>,
        reply_delay: Duration,
    ) -> Self {
        let (admin_tx, _) = broadcast::channel(ADMIN_BUFFER);
        Self {
            inner: Arc::new(Inner {
                repo,
                notifier,
                site,
                alert_email,
                reply_delay,
                visitors: DashMap::new(),
                admin_tx,
                reply_queues: DashMap::new(),
            }),
        }
    }

    // --- Connection lifecycle ---

    /// Register a visitor connection and return its event outbox.
    ///
    /// If the connection id is already registered, the old outbox is
    /// replaced.
    pub fn register_visitor(&self, connection_id: &str) -> mpsc::Receiver<VisitorEvent> {
        let (tx, rx) = mpsc::channel(VISITOR_BUFFER);
        self.inner.visitors.insert(connection_id.to_string(), tx);
        debug!(%connection_id, "registered visitor connection");
        rx
    }

    /// Drop a visitor connection's outbox. The session record is left
    /// untouched and stays available for the next reconnect lookup.
    pub fn unregister_visitor(&self, connection_id: &str) {
        if self.inner.visitors.remove(connection_id).is_some() {
            debug!(%connection_id, "unregistered visitor connection");
        }
    }

    /// Subscribe an admin console to the observer broadcast.
    pub fn subscribe_admins(&self) -> broadcast::Receiver<AdminEvent> {
        self.inner.admin_tx.subscribe()
    }

    // --- Visitor events ---

    /// Handle a visitor join (connect or reconnect).
    ///
    /// Resolves the durable session -- by email first so a visitor
    /// resumes the same conversation across devices, then by the current
    /// connection id -- creating one on first contact. The session
    /// migrates to this connection (last-connected tab wins), admin
    /// engagement resets, and the full history is delivered before
    /// anything new. Admins then receive a refreshed session list.
    pub async fn visitor_join(
        &self,
        connection_id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<(), RelayError> {
        let email = email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());

        let mut existing = match &email {
            Some(email) => self.inner.repo.find_by_email(email).await?,
            None => None,
        };
        if existing.is_none() {
            existing = self.inner.repo.find_by_connection(connection_id).await?;
        }

        match existing {
            Some(mut session) => {
                session.connection_id = Some(connection_id.to_string());
                if let Some(name) = name {
                    session.display_name = name;
                }
                if email.is_some() {
                    session.email = email;
                }
                session.admin_engaged = false;
                self.inner.repo.update_session(&session).await?;

                let messages = self.inner.repo.get_messages(&session.id).await?;
                self.send_to_connection(connection_id, VisitorEvent::History { messages });
            }
            None => {
                let display_name = name.unwrap_or_else(|| "Guest".to_string());
                let now = Utc::now();
                let session = ChatSession {
                    id: Uuid::now_v7(),
                    session_key: email
                        .clone()
                        .unwrap_or_else(|| connection_id.to_string()),
                    display_name: display_name.clone(),
                    email: email.clone(),
                    connection_id: Some(connection_id.to_string()),
                    admin_engaged: false,
                    created_at: now,
                    last_updated: now,
                };
                self.inner.repo.create_session(&session).await?;

                self.send_to_connection(
                    connection_id,
                    VisitorEvent::History {
                        messages: Vec::new(),
                    },
                );
                self.notify_new_chat(&display_name, email.as_deref());
            }
        }

        self.broadcast_session_list().await;
        Ok(())
    }

    /// Handle an inbound visitor message.
    ///
    /// Appends to the store, fans a copy out to admin observers, and --
    /// unless an admin has engaged the session -- queues an automated
    /// reply.
    pub async fn visitor_message(
        &self,
        connection_id: &str,
        text: String,
    ) -> Result<(), RelayError> {
        let session = match self.inner.repo.find_by_connection(connection_id).await? {
            Some(session) => session,
            None => {
                // A message without a prior join: open a guest session
                // keyed by the connection itself.
                let now = Utc::now();
                let session = ChatSession {
                    id: Uuid::now_v7(),
                    session_key: connection_id.to_string(),
                    display_name: "Guest".to_string(),
                    email: None,
                    connection_id: Some(connection_id.to_string()),
                    admin_engaged: false,
                    created_at: now,
                    last_updated: now,
                };
                self.inner.repo.create_session(&session).await?;
                session
            }
        };

        self.append(&session, Sender::Visitor, &text).await?;

        let _ = self.inner.admin_tx.send(AdminEvent::Message {
            session_key: session.session_key.clone(),
            sender: Sender::Visitor,
            text: text.clone(),
        });
        self.broadcast_session_list().await;

        if !session.admin_engaged {
            self.enqueue_reply(session.id, text);
        }
        Ok(())
    }

    // --- Admin events ---

    /// Full session list with transcripts, most recently updated first.
    pub async fn session_snapshots(&self) -> Result<Vec<SessionSnapshot>, RelayError> {
        let sessions = self.inner.repo.list_sessions().await?;
        let mut snapshots = Vec::with_capacity(sessions.len());
        for session in sessions {
            let messages = self.inner.repo.get_messages(&session.id).await?;
            snapshots.push(SessionSnapshot { session, messages });
        }
        Ok(snapshots)
    }

    /// Mark a session as attended: automated replies stop until the
    /// admin leaves or the visitor reconnects.
    pub async fn admin_join(&self, session_key: &str) -> Result<(), RelayError> {
        self.inner.repo.set_admin_engaged(session_key, true).await?;
        Ok(())
    }

    /// Hand a session back to the automated responder.
    pub async fn admin_leave(&self, session_key: &str) -> Result<(), RelayError> {
        self.inner
            .repo
            .set_admin_engaged(session_key, false)
            .await?;
        Ok(())
    }

    /// Deliver an admin message to a session's current connection.
    ///
    /// Does not change the attended state by itself; join and leave are
    /// separate explicit signals.
    pub async fn admin_message(
        &self,
        session_key: &str,
        text: String,
    ) -> Result<(), RelayError> {
        let session = self
            .inner
            .repo
            .find_by_key(session_key)
            .await?
            .ok_or_else(|| RelayError::UnknownSession(session_key.to_string()))?;

        self.append(&session, Sender::Admin, &text).await?;

        if let Some(connection_id) = &session.connection_id {
            self.send_to_connection(
                connection_id,
                VisitorEvent::Message {
                    sender: Sender::Admin,
                    text,
                },
            );
        }
        Ok(())
    }

    // --- Internals ---

    async fn append(
        &self,
        session: &ChatSession,
        sender: Sender,
        text: &str,
    ) -> Result<(), RepositoryError> {
        let message = ChatMessage {
            id: Uuid::now_v7(),
            session_id: session.id,
            sender,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.inner.repo.append_message(&message).await
    }

    fn send_to_connection(&self, connection_id: &str, event: VisitorEvent) {
        if let Some(tx) = self.inner.visitors.get(connection_id) {
            match tx.try_send(event) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(%connection_id, "visitor outbox full, dropping event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!(%connection_id, "visitor outbox closed");
                }
            }
        }
    }

    /// Re-read the whole session collection and broadcast it to admins.
    ///
    /// Runs after every visitor join and message. A full re-read per
    /// event is a recognized bottleneck at large visitor counts and
    /// accepted at this scale.
    async fn broadcast_session_list(&self) {
        match self.session_snapshots().await {
            Ok(sessions) => {
                let _ = self.inner.admin_tx.send(AdminEvent::SessionList { sessions });
            }
            Err(err) => warn!(error = %err, "failed to build session list broadcast"),
        }
    }

    /// Queue an automated reply for a session, spawning its worker on
    /// first use. Queue order is enqueue order, so replies never
    /// overtake each other within a session.
    fn enqueue_reply(&self, session_id: Uuid, text: String) {
        let tx = self
            .inner
            .reply_queues
            .entry(session_id)
            .or_insert_with(|| {
                let (tx, rx) = mpsc::channel(REPLY_BUFFER);
                let relay = self.clone();
                tokio::spawn(async move {
                    relay.reply_worker(session_id, rx).await;
                });
                tx
            })
            .clone();

        if tx.try_send(PendingReply { text }).is_err() {
            warn!(%session_id, "reply queue full, dropping automated reply");
        }
    }

    /// Drain one session's pending replies, one at a time.
    ///
    /// The session is re-read after each delay: if an admin engaged
    /// mid-delay the pending reply becomes a no-op instead of arriving
    /// after a human has taken over.
    async fn reply_worker(self, session_id: Uuid, mut rx: mpsc::Receiver<PendingReply>) {
        while let Some(pending) = rx.recv().await {
            tokio::time::sleep(self.inner.reply_delay).await;

            let session = match self.inner.repo.get_session(&session_id).await {
                Ok(Some(session)) => session,
                Ok(None) => continue,
                Err(err) => {
                    warn!(%session_id, error = %err, "reply worker failed to read session");
                    continue;
                }
            };
            if session.admin_engaged {
                debug!(%session_id, "admin engaged mid-delay, skipping automated reply");
                continue;
            }

            let reply = auto_reply::reply_for(&pending.text);
            if let Err(err) = self.append(&session, Sender::Automated, reply).await {
                warn!(%session_id, error = %err, "failed to persist automated reply");
                continue;
            }

            if let Some(connection_id) = &session.connection_id {
                self.send_to_connection(
                    connection_id,
                    VisitorEvent::Message {
                        sender: Sender::Automated,
                        text: reply.to_string(),
                    },
                );
            }
            let _ = self.inner.admin_tx.send(AdminEvent::Message {
                session_key: session.session_key.clone(),
                sender: Sender::Automated,
                text: reply.to_string(),
            });
        }
    }

    /// Best-effort first-contact notifications: an alert to the site
    /// owner and, when the visitor left an email, a confirmation back.
    fn notify_new_chat(&self, display_name: &str, email: Option<&str>) {
        if let Some(alert_email) = self.inner.alert_email.clone() {
            let relay = self.clone();
            let body = format!(
                "Visitor: {display_name}\nEmail: {}\nHas started a conversation on the website.",
                email.unwrap_or("-")
            );
            tokio::spawn(async move {
                if let Err(err) = relay
                    .inner
                    .notifier
                    .notify(NotifyKind::AdminAlert, &alert_email, "New chat started", &body)
                    .await
                {
                    warn!(error = %err, "new-chat admin alert failed");
                }
            });
        }

        if let Some(email) = email {
            let relay = self.clone();
            let email = email.to_string();
            let body = format!(
                "Hi {display_name},\n\nThanks for reaching out. We have received your message \
                 and will get back to you shortly.{}",
                client_footer(&self.inner.site)
            );
            tokio::spawn(async move {
                if let Err(err) = relay
                    .inner
                    .notifier
                    .notify(
                        NotifyKind::ClientConfirmation,
                        &email,
                        "We received your message",
                        &body,
                    )
                    .await
                {
                    warn!(error = %err, "new-chat client confirmation failed");
                }
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_types::error::NotifyError;
    use std::sync::Mutex;

    /// In-memory session store mirroring the SQLite repository semantics.
    #[derive(Default)]
    struct MemoryChatRepo {
        sessions: Mutex<Vec<ChatSession>>,
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl ChatRepository for MemoryChatRepo {
        async fn create_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
            self.sessions.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn get_session(
            &self,
            session_id: &Uuid,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == *session_id)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.email.as_deref() == Some(email))
                .cloned())
        }

        async fn find_by_connection(
            &self,
            connection_id: &str,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.connection_id.as_deref() == Some(connection_id))
                .cloned())
        }

        async fn find_by_key(
            &self,
            session_key: &str,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.session_key == session_key)
                .cloned())
        }

        async fn update_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let stored = sessions
                .iter_mut()
                .find(|s| s.id == session.id)
                .ok_or(RepositoryError::NotFound)?;
            *stored = session.clone();
            Ok(())
        }

        async fn set_admin_engaged(
            &self,
            session_key: &str,
            engaged: bool,
        ) -> Result<(), RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap();
            let stored = sessions
                .iter_mut()
                .find(|s| s.session_key == session_key)
                .ok_or(RepositoryError::NotFound)?;
            stored.admin_engaged = engaged;
            Ok(())
        }

        async fn append_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
            self.messages.lock().unwrap().push(message.clone());
            let mut sessions = self.sessions.lock().unwrap();
            if let Some(stored) = sessions.iter_mut().find(|s| s.id == message.session_id) {
                stored.last_updated = Utc::now();
            }
            Ok(())
        }

        async fn get_messages(
            &self,
            session_id: &Uuid,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.session_id == *session_id)
                .cloned()
                .collect())
        }

        async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
            let mut sessions = self.sessions.lock().unwrap().clone();
            sessions.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
            Ok(sessions)
        }

        async fn count_sessions(&self) -> Result<u64, RepositoryError> {
            Ok(self.sessions.lock().unwrap().len() as u64)
        }

        async fn count_messages(&self) -> Result<u64, RepositoryError> {
            Ok(self.messages.lock().unwrap().len() as u64)
        }
    }

    struct NullNotifier;

    impl Notifier for NullNotifier {
        async fn notify(
            &self,
            _kind: NotifyKind,
            _recipient: &str,
            _subject: &str,
            _body: &str,
        ) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    fn make_relay(reply_delay: Duration) -> Relay<MemoryChatRepo, NullNotifier> {
        Relay::new(
            MemoryChatRepo::default(),
            NullNotifier,
            SiteConfig::default(),
            None,
            reply_delay,
        )
    }

    async fn next_message(
        rx: &mut mpsc::Receiver<VisitorEvent>,
    ) -> (Sender, String) {
        loop {
            let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("timed out waiting for visitor event")
                .expect("visitor channel closed");
            if let VisitorEvent::Message { sender, text } = event {
                return (sender, text);
            }
        }
    }

    #[tokio::test]
    async fn join_delivers_history_first() {
        let relay = make_relay(Duration::from_millis(5));
        let mut rx = relay.register_visitor("c1");
        relay
            .visitor_join("c1", Some("Ada".to_string()), None)
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            VisitorEvent::History { messages } => assert!(messages.is_empty()),
            other => panic!("expected history first, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn email_reconnect_replays_history_in_order() {
        let relay = make_relay(Duration::from_millis(5));

        let mut rx1 = relay.register_visitor("c1");
        relay
            .visitor_join("c1", Some("Ada".to_string()), Some("Ada@Example.com ".to_string()))
            .await
            .unwrap();
        let _ = rx1.recv().await.unwrap(); // history
        relay
            .visitor_message("c1", "hello there".to_string())
            .await
            .unwrap();
        let _ = next_message(&mut rx1).await; // automated reply
        relay.unregister_visitor("c1");

        // Reconnect from a different connection with the same email.
        let mut rx2 = relay.register_visitor("c2");
        relay
            .visitor_join("c2", Some("Ada".to_string()), Some("ada@example.com".to_string()))
            .await
            .unwrap();

        match rx2.recv().await.unwrap() {
            VisitorEvent::History { messages } => {
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[0].sender, Sender::Visitor);
                assert_eq!(messages[0].text, "hello there");
                assert_eq!(messages[1].sender, Sender::Automated);
            }
            other => panic!("expected history, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rapid_fire_messages_get_replies_in_send_order() {
        let relay = make_relay(Duration::from_millis(10));
        let mut rx = relay.register_visitor("c1");
        relay.visitor_join("c1", None, None).await.unwrap();
        let _ = rx.recv().await.unwrap(); // history

        relay
            .visitor_message("c1", "what is the price?".to_string())
            .await
            .unwrap();
        relay
            .visitor_message("c1", "hello?".to_string())
            .await
            .unwrap();

        let (sender1, text1) = next_message(&mut rx).await;
        let (sender2, text2) = next_message(&mut rx).await;
        assert_eq!(sender1, Sender::Automated);
        assert_eq!(sender2, Sender::Automated);
        assert!(text1.contains("pricing"), "first reply answers the price question");
        assert!(text2.starts_with("Hi!"), "second reply answers the greeting");
    }

    #[tokio::test]
    async fn admin_join_stops_automated_replies() {
        let relay = make_relay(Duration::from_millis(10));
        let mut rx = relay.register_visitor("c1");
        relay.visitor_join("c1", None, None).await.unwrap();
        let _ = rx.recv().await.unwrap(); // history

        relay.admin_join("c1").await.unwrap();
        relay
            .visitor_message("c1", "anyone there?".to_string())
            .await
            .unwrap();

        let outcome =
            tokio::time::timeout(Duration::from_millis(100), next_message(&mut rx)).await;
        assert!(outcome.is_err(), "no automated reply while attended");
    }

    #[tokio::test]
    async fn admin_join_mid_delay_cancels_pending_reply() {
        let relay = make_relay(Duration::from_millis(100));
        let mut rx = relay.register_visitor("c1");
        relay.visitor_join("c1", None, None).await.unwrap();
        let _ = rx.recv().await.unwrap(); // history

        relay
            .visitor_message("c1", "quick question".to_string())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        relay.admin_join("c1").await.unwrap();

        let outcome =
            tokio::time::timeout(Duration::from_millis(300), next_message(&mut rx)).await;
        assert!(outcome.is_err(), "pending reply is dropped once an admin joins");
    }

    #[tokio::test]
    async fn admin_leave_resumes_automated_replies() {
        let relay = make_relay(Duration::from_millis(5));
        let mut rx = relay.register_visitor("c1");
        relay.visitor_join("c1", None, None).await.unwrap();
        let _ = rx.recv().await.unwrap(); // history

        relay.admin_join("c1").await.unwrap();
        relay.admin_leave("c1").await.unwrap();
        relay
            .visitor_message("c1", "still there?".to_string())
            .await
            .unwrap();

        let (sender, _) = next_message(&mut rx).await;
        assert_eq!(sender, Sender::Automated);
    }

    #[tokio::test]
    async fn admin_message_reaches_current_connection() {
        let relay = make_relay(Duration::from_millis(5));
        let mut rx = relay.register_visitor("c1");
        relay.visitor_join("c1", None, None).await.unwrap();
        let _ = rx.recv().await.unwrap(); // history

        relay.admin_join("c1").await.unwrap();
        relay
            .admin_message("c1", "Hi, human here.".to_string())
            .await
            .unwrap();

        let (sender, text) = next_message(&mut rx).await;
        assert_eq!(sender, Sender::Admin);
        assert_eq!(text, "Hi, human here.");
    }

    #[tokio::test]
    async fn admin_message_to_unknown_session_errors() {
        let relay = make_relay(Duration::from_millis(5));
        let result = relay.admin_message("nope", "hello".to_string()).await;
        assert!(matches!(result, Err(RelayError::UnknownSession(_))));
    }

    #[tokio::test]
    async fn admins_observe_visitor_traffic() {
        let relay = make_relay(Duration::from_millis(5));
        let mut admin_rx = relay.subscribe_admins();

        let mut rx = relay.register_visitor("c1");
        relay.visitor_join("c1", None, None).await.unwrap();
        let _ = rx.recv().await.unwrap(); // history

        relay
            .visitor_message("c1", "show me around".to_string())
            .await
            .unwrap();

        // Skip session-list broadcasts until the message itself shows up.
        loop {
            let event = tokio::time::timeout(Duration::from_secs(2), admin_rx.recv())
                .await
                .expect("timed out waiting for admin event")
                .expect("admin channel closed");
            if let AdminEvent::Message { sender, text, .. } = event {
                assert_eq!(sender, Sender::Visitor);
                assert_eq!(text, "show me around");
                break;
            }
        }
    }

    #[tokio::test]
    async fn session_list_orders_by_recency() {
        let relay = make_relay(Duration::from_millis(500));

        let _rx1 = relay.register_visitor("c1");
        relay.visitor_join("c1", None, None).await.unwrap();
        let _rx2 = relay.register_visitor("c2");
        relay.visitor_join("c2", None, None).await.unwrap();

        relay
            .visitor_message("c1", "second wind".to_string())
            .await
            .unwrap();

        let snapshots = relay.session_snapshots().await.unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].session.session_key, "c1");
        assert_eq!(snapshots[0].messages.len(), 1);
    }
}
