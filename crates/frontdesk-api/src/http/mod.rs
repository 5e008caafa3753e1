//! HTTP and WebSocket server surface.

pub mod error;
pub mod handlers;
pub mod router;
