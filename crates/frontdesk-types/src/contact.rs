//! Contact inquiry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted contact-form inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub company: Option<String>,
    pub newsletter: bool,
    pub created_at: DateTime<Utc>,
}

/// Incoming contact-form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub newsletter: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_request_optional_flags_default() {
        let req: ContactRequest = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "message": "Hello"}"#,
        )
        .unwrap();
        assert!(req.company.is_none());
        assert!(!req.newsletter);
        assert_eq!(req.subject, "");
    }
}
