//! GET /api/v1/slots - available time slots for a meeting type and day.

use axum::Json;
use axum::extract::Query;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use frontdesk_core::slots::available_slots;
use frontdesk_types::error::BookingError;

use crate::http::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    #[serde(default)]
    pub meeting_type: Option<String>,
    /// Calendar day as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

/// List bookable slots. Unknown meeting types and non-business days
/// yield an empty list, not an error; the picker renders both the same.
pub async fn get_slots(Query(query): Query<SlotsQuery>) -> Result<Json<Value>, AppError> {
    let meeting_type = query
        .meeting_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(BookingError::MissingField("meeting_type"))?;
    let date_text = query
        .date
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(BookingError::MissingField("date"))?;

    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(date_text.to_string()))?;

    // Wall-clock "now" so today's already-started slots drop out.
    let now = chrono::Local::now().naive_local();
    let slots = available_slots(meeting_type, date, now);

    Ok(Json(json!({ "slots": slots })))
}
