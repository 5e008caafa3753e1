//! Outbound email via an HTTP mail API.
//!
//! Implements the `Notifier` port from `frontdesk-core`. Email goes out
//! through a JSON POST to a transactional mail API (anything with a
//! `{from, to, subject, text}` body and bearer-token auth). When the
//! API URL or token is not configured, the mailer degrades to a logged
//! no-op so the rest of the system runs unchanged in development.
//!
//! The API token is wrapped in [`secrecy::SecretString`] and is only
//! exposed when building the Authorization header. It never appears in
//! Debug output or tracing logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use frontdesk_core::notify::{Notifier, NotifyKind};
use frontdesk_types::config::MailerConfig;
use frontdesk_types::error::NotifyError;

/// Concrete [`Notifier`] chosen from configuration at startup.
pub enum Mailer {
    Http(HttpMailer),
    /// No API configured; every dispatch is logged and dropped.
    Disabled,
}

impl Mailer {
    /// Build a mailer from configuration. Needs both an API URL and a
    /// token to go live; anything less yields the disabled variant.
    pub fn from_config(config: &MailerConfig) -> Self {
        match (&config.api_url, &config.api_token) {
            (Some(url), Some(token)) => Mailer::Http(HttpMailer::new(
                url.clone(),
                SecretString::from(token.clone()),
                config.from.clone(),
            )),
            _ => {
                tracing::info!("mailer not configured, outbound email disabled");
                Mailer::Disabled
            }
        }
    }
}

impl Notifier for Mailer {
    async fn notify(
        &self,
        kind: NotifyKind,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        match self {
            Mailer::Http(mailer) => mailer.send(recipient, subject, body).await,
            Mailer::Disabled => {
                tracing::debug!(?kind, recipient, subject, "email skipped, mailer disabled");
                Ok(())
            }
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// HTTP client for the mail API.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_token: SecretString,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_token: SecretString, from: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_url,
            api_token,
            from,
        }
    }

    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let request = SendRequest {
            from: &self.from,
            to: recipient,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError::Http(format!("mail request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Api(status.as_u16()));
        }

        tracing::debug!(recipient, subject, "email dispatched");
        Ok(())
    }
}
