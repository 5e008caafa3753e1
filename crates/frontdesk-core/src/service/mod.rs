//! Request-handling services orchestrating validation, persistence, and
//! best-effort notification dispatch.

pub mod booking;
pub mod contact;
