//! Keyword-matched canned replies for unattended chat sessions.
//!
//! Intentionally simple, and modeled as a pure `text -> reply` function
//! so it can be swapped or extended without touching the relay's
//! delivery logic.

/// Pick a canned reply for an inbound visitor message.
pub fn reply_for(message: &str) -> &'static str {
    let msg = message.to_lowercase();
    if msg.contains("price") || msg.contains("cost") {
        "Our pricing depends on scope. Shall we book a call?"
    } else if msg.contains("hello") || msg.contains("hi") {
        "Hi! Welcome. How can I help?"
    } else {
        "Thanks! An agent will be with you shortly."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_keywords_get_pricing_reply() {
        assert!(reply_for("What does it COST?").contains("pricing"));
        assert!(reply_for("price list please").contains("pricing"));
    }

    #[test]
    fn greetings_get_greeting_reply() {
        assert!(reply_for("Hello there").starts_with("Hi!"));
    }

    #[test]
    fn anything_else_gets_acknowledgment() {
        assert!(reply_for("Do you build mobile apps?").contains("agent"));
    }
}
