//! Repository trait definitions ("ports") implemented by frontdesk-infra.

pub mod appointment;
pub mod contact;

pub use appointment::AppointmentRepository;
pub use contact::ContactRepository;
