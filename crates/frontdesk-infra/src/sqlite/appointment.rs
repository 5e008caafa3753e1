//! SQLite appointment store.

use chrono::NaiveDate;
use frontdesk_core::repository::AppointmentRepository;
use frontdesk_types::appointment::{Appointment, TimeSlot};
use frontdesk_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `AppointmentRepository`.
pub struct SqliteAppointmentRepository {
    pool: DatabasePool,
}

impl SqliteAppointmentRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct AppointmentRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    meeting_type: String,
    date: String,
    slot_start: String,
    slot_end: String,
    message: String,
    created_at: String,
}

impl AppointmentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            meeting_type: row.try_get("meeting_type")?,
            date: row.try_get("date")?,
            slot_start: row.try_get("slot_start")?,
            slot_end: row.try_get("slot_end")?,
            message: row.try_get("message")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_appointment(self) -> Result<Appointment, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid appointment id: {e}")))?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| RepositoryError::Query(format!("invalid date: {e}")))?;

        Ok(Appointment {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            meeting_type: self.meeting_type,
            date,
            slot: TimeSlot {
                start: self.slot_start,
                end: self.slot_end,
            },
            message: self.message,
            created_at: super::parse_datetime(&self.created_at)?,
        })
    }
}

impl AppointmentRepository for SqliteAppointmentRepository {
    async fn insert(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO appointments (id, name, email, phone, meeting_type, date, slot_start, slot_end, message, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(appointment.id.to_string())
        .bind(&appointment.name)
        .bind(&appointment.email)
        .bind(&appointment.phone)
        .bind(&appointment.meeting_type)
        .bind(appointment.date.format("%Y-%m-%d").to_string())
        .bind(&appointment.slot.start)
        .bind(&appointment.slot.end)
        .bind(&appointment.message)
        .bind(super::format_datetime(&appointment.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Appointment>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM appointments ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut appointments = Vec::with_capacity(rows.len());
        for row in &rows {
            let appt_row = AppointmentRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            appointments.push(appt_row.into_appointment()?);
        }

        Ok(appointments)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM appointments")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_appointment(name: &str) -> Appointment {
        Appointment {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            meeting_type: "zoom".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
            slot: TimeSlot {
                start: "10:00 AM".to_string(),
                end: "11:00 AM".to_string(),
            },
            message: "Kickoff call".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_round_trip() {
        let repo = SqliteAppointmentRepository::new(test_pool().await);

        let appointment = make_appointment("Ada");
        repo.insert(&appointment).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, appointment.id);
        assert_eq!(all[0].date, appointment.date);
        assert_eq!(all[0].slot, appointment.slot);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = SqliteAppointmentRepository::new(test_pool().await);

        let mut first = make_appointment("Ada");
        first.created_at = Utc::now() - Duration::seconds(10);
        repo.insert(&first).await.unwrap();
        let second = make_appointment("Grace");
        repo.insert(&second).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all[0].name, "Grace");
        assert_eq!(all[1].name, "Ada");
    }
}
