//! Application error type mapping to HTTP status codes.
//!
//! Responses use the site's form-feedback shape: a JSON body with
//! `success: false` and a human-readable `message`. Storage failures are
//! never echoed to the caller; they map to a generic 500 body and the
//! detail stays in the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use frontdesk_types::error::{BookingError, ContactError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Booking submission errors.
    Booking(BookingError),
    /// Contact submission errors.
    Contact(ContactError),
    /// Authentication failure.
    Unauthorized(String),
    /// Generic internal error.
    Internal(String),
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        AppError::Booking(e)
    }
}

impl From<ContactError> for AppError {
    fn from(e: ContactError) -> Self {
        AppError::Contact(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Booking(BookingError::Repository(e)) => {
                tracing::error!("appointment storage failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
            AppError::Booking(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Contact(ContactError::Repository(e)) => {
                tracing::error!("contact storage failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
            AppError::Contact(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_types::error::RepositoryError;

    #[test]
    fn validation_errors_are_bad_request() {
        let response = AppError::from(BookingError::MissingField("slot")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(BookingError::SlotUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_errors_are_internal() {
        let err = BookingError::Repository(RepositoryError::Query("disk full".to_string()));
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = AppError::Unauthorized("bad password".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
