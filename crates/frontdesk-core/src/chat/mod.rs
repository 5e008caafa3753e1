//! Chat session persistence and real-time relay for visitor live chat.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, the keyword auto-reply generator, and the [`relay`]
//! that routes messages between visitor connections, the automated
//! responder, and admin observers.

pub mod auto_reply;
pub mod relay;
pub mod repository;
