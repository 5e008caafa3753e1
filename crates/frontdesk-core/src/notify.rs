//! Notification dispatch port.
//!
//! The booking service, contact service, and chat relay all notify by
//! email on a best-effort basis: dispatch runs in a spawned task, a
//! failure is logged and never affects the caller-visible result or the
//! persisted record.

use frontdesk_types::config::SiteConfig;
use frontdesk_types::error::NotifyError;

/// What kind of notification is being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    /// Alert to the site owner (new booking, inquiry, or chat).
    AdminAlert,
    /// Confirmation back to the visitor who submitted something.
    ClientConfirmation,
}

/// Outbound notification port. Implementations live in frontdesk-infra.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait Notifier: Send + Sync {
    fn notify(
        &self,
        kind: NotifyKind,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

/// Footer appended to every client-facing email body.
pub fn client_footer(site: &SiteConfig) -> String {
    let mut footer = String::from("\n\n---\n");
    if let Some(url) = &site.url {
        footer.push_str(&format!("Website: {url}\n"));
    }
    if let Some(phone) = &site.phone {
        footer.push_str(&format!("Call us: {phone}\n"));
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_includes_configured_site_details() {
        let site = SiteConfig {
            url: Some("https://example.com".to_string()),
            phone: Some("555-0100".to_string()),
        };
        let footer = client_footer(&site);
        assert!(footer.contains("Website: https://example.com"));
        assert!(footer.contains("Call us: 555-0100"));
    }

    #[test]
    fn footer_without_site_details_is_just_a_rule() {
        let footer = client_footer(&SiteConfig::default());
        assert_eq!(footer, "\n\n---\n");
    }
}
