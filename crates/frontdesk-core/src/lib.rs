//! Business logic and repository trait definitions for Frontdesk.
//!
//! This crate defines the "ports" (repository and notifier traits) that
//! the infrastructure layer implements. It depends only on
//! `frontdesk-types` -- never on `frontdesk-infra` or any database/IO
//! crate. Contains the slot rule engine, the chat relay, and the booking
//! and contact services.

pub mod chat;
pub mod notify;
pub mod repository;
pub mod service;
pub mod slots;
