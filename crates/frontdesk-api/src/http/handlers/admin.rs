//! Admin console endpoints: login and the dashboard listing.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// POST /api/v1/admin/login - check the console password.
///
/// Login is refused outright while no password is configured; there is
/// no default credential.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let configured = state
        .config
        .admin
        .password
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("admin login is not configured".to_string()))?;

    if request.password != configured {
        tracing::warn!("rejected admin login attempt");
        return Err(AppError::Unauthorized("invalid password".to_string()));
    }

    Ok(Json(json!({ "success": true })))
}

/// GET /api/v1/admin/dashboard - stored inquiries and bookings, newest
/// first.
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let contacts = state.contact_service.list().await?;
    let appointments = state.booking_service.list().await?;

    Ok(Json(json!({
        "contacts": contacts,
        "appointments": appointments,
    })))
}
