//! Shared domain types for Frontdesk.
//!
//! This crate contains the core domain types used across the Frontdesk
//! backend: appointments and their time slots, chat sessions and messages,
//! contact inquiries, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod appointment;
pub mod chat;
pub mod config;
pub mod contact;
pub mod error;
