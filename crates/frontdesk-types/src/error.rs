use thiserror::Error;

/// Errors from repository operations (used by trait definitions in
/// frontdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from an appointment booking submission.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid date: '{0}'")]
    InvalidDate(String),

    #[error("slot is not available for this meeting type and date")]
    SlotUnavailable,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from a contact-form submission.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from notification dispatch.
///
/// Always swallowed (logged) at the call site; never surfaced to the
/// visitor-facing request.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(String),

    #[error("mail API returned status {0}")]
    Api(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_error_display() {
        let err = BookingError::MissingField("slot");
        assert_eq!(err.to_string(), "missing required field: slot");
    }

    #[test]
    fn repository_error_converts_into_booking_error() {
        let err: BookingError = RepositoryError::Query("disk full".to_string()).into();
        assert!(matches!(err, BookingError::Repository(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
