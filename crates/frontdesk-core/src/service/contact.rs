//! Contact-form service.
//!
//! Same shape as the booking service: validate, persist, then two
//! fire-and-forget notifications that never affect the caller-visible
//! result.

use std::sync::Arc;

use chrono::Utc;
use frontdesk_types::config::SiteConfig;
use frontdesk_types::contact::{Contact, ContactRequest};
use frontdesk_types::error::ContactError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::notify::{Notifier, NotifyKind, client_footer};
use crate::repository::contact::ContactRepository;

/// Orchestrates contact-form submissions.
pub struct ContactService<C, N> {
    repo: Arc<C>,
    notifier: Arc<N>,
    site: SiteConfig,
    alert_email: Option<String>,
}

impl<C, N> ContactService<C, N>
where
    C: ContactRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        repo: Arc<C>,
        notifier: Arc<N>,
        site: SiteConfig,
        alert_email: Option<String>,
    ) -> Self {
        Self {
            repo,
            notifier,
            site,
            alert_email,
        }
    }

    /// Accept or reject a contact inquiry.
    pub async fn submit(&self, request: ContactRequest) -> Result<Contact, ContactError> {
        if request.name.trim().is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if request.email.trim().is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if request.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }

        let contact = Contact {
            id: Uuid::now_v7(),
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
            company: request.company,
            newsletter: request.newsletter,
            created_at: Utc::now(),
        };
        self.repo.insert(&contact).await?;
        info!(contact_id = %contact.id, "contact inquiry saved");

        self.notify_received(&contact);
        Ok(contact)
    }

    /// List all inquiries, newest first (admin dashboard).
    pub async fn list(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.repo.list().await?)
    }

    /// Count all inquiries.
    pub async fn count(&self) -> Result<u64, ContactError> {
        Ok(self.repo.count().await?)
    }

    fn notify_received(&self, contact: &Contact) {
        if let Some(alert_email) = self.alert_email.clone() {
            let notifier = Arc::clone(&self.notifier);
            let body = format!(
                "Name: {}\nEmail: {}\nSubject: {}\nMessage: {}",
                contact.name,
                contact.email,
                if contact.subject.is_empty() { "-" } else { &contact.subject },
                contact.message,
            );
            tokio::spawn(async move {
                if let Err(err) = notifier
                    .notify(
                        NotifyKind::AdminAlert,
                        &alert_email,
                        "New contact inquiry",
                        &body,
                    )
                    .await
                {
                    warn!(error = %err, "contact admin alert failed");
                }
            });
        }

        let notifier = Arc::clone(&self.notifier);
        let recipient = contact.email.clone();
        let body = format!(
            "Hi {},\n\nThank you for getting in touch. We have received your inquiry \
             and will get back to you shortly.\n\nWhat you asked about: {}{}",
            contact.name,
            if contact.subject.is_empty() { "General inquiry" } else { &contact.subject },
            client_footer(&self.site),
        );
        tokio::spawn(async move {
            if let Err(err) = notifier
                .notify(
                    NotifyKind::ClientConfirmation,
                    &recipient,
                    "We received your inquiry",
                    &body,
                )
                .await
            {
                warn!(error = %err, "contact client confirmation failed");
            }
        });
    }
}
