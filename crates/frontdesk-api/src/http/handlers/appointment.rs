//! POST /api/v1/appointments - book an appointment.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use frontdesk_types::appointment::BookingRequest;

use crate::http::error::AppError;
use crate::state::AppState;

/// Accept a booking submission. The chosen slot is re-checked against
/// the rule engine at submission time, so a stale picker cannot book a
/// slot that is no longer offered.
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Value>, AppError> {
    let now = chrono::Local::now().naive_local();
    state.booking_service.submit(request, now).await?;

    Ok(Json(json!({ "success": true })))
}
