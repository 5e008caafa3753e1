//! AppointmentRepository trait definition.

use frontdesk_types::appointment::Appointment;
use frontdesk_types::error::RepositoryError;

/// Persistence port for appointment records.
///
/// Appointments are immutable once created: insert and list are the only
/// operations the core needs. Uses native async fn in traits (RPITIT).
pub trait AppointmentRepository: Send + Sync {
    /// Persist a new appointment.
    fn insert(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all appointments, newest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, RepositoryError>> + Send;

    /// Count all appointments.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
