//! Appointment booking service.
//!
//! Validates a submission, checks the chosen slot against the slot rule
//! engine for that meeting type and date at booking time, persists the
//! appointment, then dispatches two fire-and-forget notifications (admin
//! alert and client confirmation). Persistence success alone determines
//! the caller-visible result; notification failures are logged and never
//! roll anything back.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use frontdesk_types::appointment::{Appointment, BookingRequest};
use frontdesk_types::config::SiteConfig;
use frontdesk_types::error::BookingError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::notify::{Notifier, NotifyKind, client_footer};
use crate::repository::appointment::AppointmentRepository;
use crate::slots;

/// Orchestrates appointment submissions.
pub struct BookingService<A, N> {
    repo: Arc<A>,
    notifier: Arc<N>,
    site: SiteConfig,
    alert_email: Option<String>,
}

impl<A, N> BookingService<A, N>
where
    A: AppointmentRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        repo: Arc<A>,
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

    /// Accept or reject a booking submission.
    ///
    /// `now` is the wall-clock evaluation time passed through to the
    /// slot engine, so the availability check matches what a picker
    /// showing slots at the same moment would have offered.
    pub async fn submit(
        &self,
        request: BookingRequest,
        now: NaiveDateTime,
    ) -> Result<Appointment, BookingError> {
        let meeting_type = request
            .meeting_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(BookingError::MissingField("meeting_type"))?;
        let date_str = request
            .date
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or(BookingError::MissingField("date"))?;
        let slot = request
            .slot
            .clone()
            .ok_or(BookingError::MissingField("slot"))?;

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| BookingError::InvalidDate(date_str.to_string()))?;

        // The chosen slot must be one the engine would produce for this
        // meeting type and date right now.
        if !slots::available_slots(meeting_type, date, now).contains(&slot) {
            return Err(BookingError::SlotUnavailable);
        }

        let appointment = Appointment {
            id: Uuid::now_v7(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            meeting_type: meeting_type.to_string(),
            date,
            slot,
            message: request.message,
            created_at: Utc::now(),
        };
        self.repo.insert(&appointment).await?;
        info!(appointment_id = %appointment.id, meeting_type, %date, "appointment booked");

        self.notify_booked(&appointment);
        Ok(appointment)
    }

    /// List all appointments, newest first (admin dashboard).
    pub async fn list(&self) -> Result<Vec<Appointment>, BookingError> {
        Ok(self.repo.list().await?)
    }

    /// Count all appointments.
    pub async fn count(&self) -> Result<u64, BookingError> {
        Ok(self.repo.count().await?)
    }

    /// Fire-and-forget admin alert and client confirmation.
    fn notify_booked(&self, appointment: &Appointment) {
        let slot = format!("{} - {}", appointment.slot.start, appointment.slot.end);

        if let Some(alert_email) = self.alert_email.clone() {
            let notifier = Arc::clone(&self.notifier);
            let body = format!(
                "Name: {}\nEmail: {}\nPhone: {}\nType: {}\nDate: {}\nTime: {slot}",
                appointment.name,
                appointment.email,
                appointment.phone,
                appointment.meeting_type,
                appointment.date,
            );
            tokio::spawn(async move {
                if let Err(err) = notifier
                    .notify(
                        NotifyKind::AdminAlert,
                        &alert_email,
                        "New appointment booked",
                        &body,
                    )
                    .await
                {
                    warn!(error = %err, "appointment admin alert failed");
                }
            });
        }

        if !appointment.email.is_empty() {
            let notifier = Arc::clone(&self.notifier);
            let recipient = appointment.email.clone();
            let body = format!(
                "Hi {},\n\nYour appointment request has been received.\n\n\
                 Type: {}\nDate: {}\nTime: {slot}\n\nWe will confirm shortly.{}",
                if appointment.name.is_empty() { "there" } else { &appointment.name },
                appointment.meeting_type,
                appointment.date,
                client_footer(&self.site),
            );
            tokio::spawn(async move {
                if let Err(err) = notifier
                    .notify(
                        NotifyKind::ClientConfirmation,
                        &recipient,
                        "Appointment request received",
                        &body,
                    )
                    .await
                {
                    warn!(error = %err, "appointment client confirmation failed");
                }
            });
        }
    }
}
