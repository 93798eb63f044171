//! Storage layer
//!
//! One trait, two near-duplicate backends:
//! - [`PgStore`]: networked PostgreSQL behind a bounded connection pool
//! - [`SqliteStore`]: embedded SQLite behind a single shared connection
//!
//! The backends differ only in connection setup and minor SQL dialect
//! (placeholders, date functions, LIKE case rules). Every operation is a
//! single parameterized statement; "zero rows affected" on mutations maps
//! to [`DbError::NotFound`].

pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Lead, LeadFilter, NewLead, NewUser, User};

pub use postgres::PgStore;
pub use sqlite::SqliteStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("unsupported database url '{0}' (expected postgres:// or sqlite:)")]
    UnsupportedUrl(String),
}

/// Storage backend seam.
///
/// Handlers only see this trait; the backend is picked once at startup.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Idempotent schema bootstrap, run before serving.
    async fn migrate(&self) -> Result<(), DbError>;

    // Users
    async fn list_users(&self) -> Result<Vec<User>, DbError>;
    async fn get_user(&self, id: i64) -> Result<User, DbError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
    async fn create_user(&self, user: &NewUser) -> Result<i64, DbError>;
    async fn update_user(&self, id: i64, user: &NewUser) -> Result<(), DbError>;
    async fn delete_user(&self, id: i64) -> Result<(), DbError>;

    // Leads
    async fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>, DbError>;
    async fn get_lead(&self, id: i64) -> Result<Lead, DbError>;
    /// Leads assigned to `username`, matched case-insensitively.
    async fn leads_for_employee(&self, username: &str) -> Result<Vec<Lead>, DbError>;
    /// That employee's leads whose follow-up date falls on the current day.
    async fn follow_ups_due_today(&self, username: &str) -> Result<Vec<Lead>, DbError>;
    /// That employee's leads due on or before today and not yet followed up.
    async fn missed_follow_ups(&self, username: &str) -> Result<Vec<Lead>, DbError>;
    async fn create_lead(&self, lead: &NewLead) -> Result<i64, DbError>;
    async fn update_lead(&self, id: i64, lead: &NewLead) -> Result<(), DbError>;
    async fn delete_lead(&self, id: i64) -> Result<(), DbError>;
    async fn set_followed_up(&self, id: i64, followed_up: bool) -> Result<(), DbError>;
}

/// Connect to the backend selected by the URL scheme.
pub async fn connect(database_url: &str) -> Result<Arc<dyn Store>, DbError> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok(Arc::new(PgStore::connect(database_url).await?))
    } else if database_url.starts_with("sqlite:") {
        Ok(Arc::new(SqliteStore::connect(database_url).await?))
    } else {
        Err(DbError::UnsupportedUrl(database_url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_scheme_is_rejected() {
        let err = connect("mysql://localhost/leads").await.unwrap_err();
        assert!(matches!(err, DbError::UnsupportedUrl(_)));
    }
}
