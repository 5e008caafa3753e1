//! SQLite contact inquiry store.

use frontdesk_core::repository::ContactRepository;
use frontdesk_types::contact::Contact;
use frontdesk_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ContactRepository`.
pub struct SqliteContactRepository {
    pool: DatabasePool,
}

impl SqliteContactRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ContactRow {
    id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    company: Option<String>,
    newsletter: i64,
    created_at: String,
}

impl ContactRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            company: row.try_get("company")?,
            newsletter: row.try_get("newsletter")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_contact(self) -> Result<Contact, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid contact id: {e}")))?;

        Ok(Contact {
            id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            company: self.company,
            newsletter: self.newsletter != 0,
            created_at: super::parse_datetime(&self.created_at)?,
        })
    }
}

impl ContactRepository for SqliteContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO contacts (id, name, email, subject, message, company, newsletter, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(contact.id.to_string())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(&contact.company)
        .bind(contact.newsletter as i64)
        .bind(super::format_datetime(&contact.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM contacts ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut contacts = Vec::with_capacity(rows.len());
        for row in &rows {
            let contact_row =
                ContactRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            contacts.push(contact_row.into_contact()?);
        }

        Ok(contacts)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM contacts")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count as u64)
    }
}
