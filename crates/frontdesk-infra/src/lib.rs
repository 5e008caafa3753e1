//! Infrastructure layer for Frontdesk.
//!
//! Contains implementations of the repository and notifier traits
//! defined in `frontdesk-core`: SQLite storage, the outbound email HTTP
//! mailer, and the configuration loader.

pub mod config;
pub mod mailer;
pub mod sqlite;
