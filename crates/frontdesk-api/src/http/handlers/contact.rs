//! POST /api/v1/contact - submit a contact inquiry.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use frontdesk_types::contact::ContactRequest;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<Value>, AppError> {
    state.contact_service.submit(request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Thanks for reaching out! We'll get back to you shortly.",
    })))
}
