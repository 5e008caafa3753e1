//! Appointment and time slot types.
//!
//! A [`TimeSlot`] is a bookable window produced by the slot engine and is
//! never persisted on its own -- only as the chosen slot inside an
//! [`Appointment`]. Appointments are immutable once created; there is no
//! reschedule or cancel flow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable contiguous time window for one meeting type.
///
/// Both bounds are 12-hour wall-clock text (e.g. `"10:00 AM"`), matching
/// what the site's slot picker renders and submits back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

/// A confirmed appointment booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub meeting_type: String,
    /// Calendar day only; the time lives in `slot`.
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming booking submission from the site's appointment form.
///
/// `meeting_type`, `date`, and `slot` are the three fields the picker
/// may leave unset; the booking service rejects a submission missing
/// any of them before touching storage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub meeting_type: Option<String>,
    /// Calendar day as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub slot: Option<TimeSlot>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_request_tolerates_missing_fields() {
        let req: BookingRequest = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(req.name, "Ada");
        assert!(req.meeting_type.is_none());
        assert!(req.date.is_none());
        assert!(req.slot.is_none());
    }

    #[test]
    fn booking_request_parses_full_payload() {
        let req: BookingRequest = serde_json::from_str(
            r#"{
                "name": "Ada",
                "email": "ada@example.com",
                "phone": "555-0100",
                "meeting_type": "zoom",
                "date": "2026-09-07",
                "slot": {"start": "10:00 AM", "end": "11:00 AM"},
                "message": "Kickoff call"
            }"#,
        )
        .unwrap();
        assert_eq!(req.meeting_type.as_deref(), Some("zoom"));
        assert_eq!(
            req.slot,
            Some(TimeSlot {
                start: "10:00 AM".to_string(),
                end: "11:00 AM".to_string(),
            })
        );
    }
}
