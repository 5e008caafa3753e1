//! ContactRepository trait definition.

use frontdesk_types::contact::Contact;
use frontdesk_types::error::RepositoryError;

/// Persistence port for contact-form inquiries.
pub trait ContactRepository: Send + Sync {
    /// Persist a new inquiry.
    fn insert(
        &self,
        contact: &Contact,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all inquiries, newest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Contact>, RepositoryError>> + Send;

    /// Count all inquiries.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
