//! HTTP and WebSocket request handlers.

pub mod admin;
pub mod admin_ws;
pub mod appointment;
pub mod chat_ws;
pub mod contact;
pub mod slots;
