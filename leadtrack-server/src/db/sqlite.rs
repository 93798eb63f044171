//! SQLite backend - the embedded variant
//!
//! Single shared connection, `?` placeholders, `last_insert_rowid` for
//! inserts, `date(...)` for day comparison. `LIKE` is case-insensitive for
//! ASCII here, so location filtering ignores case in this variant.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use super::{DbError, Store};
use crate::models::{Lead, LeadFilter, NewLead, NewUser, User};

/// SQLite store
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database file (created on first use), capped at one
    /// connection: the embedded variant runs on a single shared handle.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (for testing).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn migrate(&self) -> Result<(), DbError> {
        tracing::info!("running schema bootstrap (sqlite)");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                username TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                occupation TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS leads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                store_name TEXT NOT NULL,
                store_type TEXT NOT NULL,
                store_location TEXT NOT NULL,
                contact_no TEXT NOT NULL,
                employee_name TEXT NOT NULL,
                status TEXT NOT NULL,
                remark TEXT,
                follow_up_date TEXT NOT NULL,
                is_followed_up INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_employee ON leads (employee_name)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_location ON leads (store_location)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as(
            "SELECT id, name, username, password_hash, occupation FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn get_user(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as(
            "SELECT id, name, username, password_hash, occupation FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            "SELECT id, name, username, password_hash, occupation FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> Result<i64, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, username, password_hash, occupation)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.occupation.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update_user(&self, id: i64, user: &NewUser) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, username = ?, password_hash = ?, occupation = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.occupation.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>, DbError> {
        const COLUMNS: &str = "id, store_name, store_type, store_location, contact_no, \
                               employee_name, status, remark, follow_up_date, is_followed_up";

        let leads = match (
            filter.store_location.as_deref(),
            filter.employee_name.as_deref(),
        ) {
            (Some(location), Some(employee)) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM leads \
                     WHERE store_location LIKE ? \
                     AND LOWER(employee_name) LIKE LOWER(?) \
                     ORDER BY id"
                ))
                .bind(format!("%{location}%"))
                .bind(format!("%{employee}%"))
                .fetch_all(&self.pool)
                .await?
            }
            (Some(location), None) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM leads WHERE store_location LIKE ? ORDER BY id"
                ))
                .bind(format!("%{location}%"))
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(employee)) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM leads \
                     WHERE LOWER(employee_name) LIKE LOWER(?) ORDER BY id"
                ))
                .bind(format!("%{employee}%"))
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query_as(&format!("SELECT {COLUMNS} FROM leads ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(leads)
    }

    async fn get_lead(&self, id: i64) -> Result<Lead, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, store_name, store_type, store_location, contact_no,
                   employee_name, status, remark, follow_up_date, is_followed_up
            FROM leads WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "lead",
            id: id.to_string(),
        })
    }

    async fn leads_for_employee(&self, username: &str) -> Result<Vec<Lead>, DbError> {
        let leads = sqlx::query_as(
            r#"
            SELECT id, store_name, store_type, store_location, contact_no,
                   employee_name, status, remark, follow_up_date, is_followed_up
            FROM leads
            WHERE LOWER(employee_name) = LOWER(?)
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    async fn follow_ups_due_today(&self, username: &str) -> Result<Vec<Lead>, DbError> {
        let leads = sqlx::query_as(
            r#"
            SELECT id, store_name, store_type, store_location, contact_no,
                   employee_name, status, remark, follow_up_date, is_followed_up
            FROM leads
            WHERE LOWER(employee_name) = LOWER(?)
            AND date(follow_up_date) = date('now')
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    async fn missed_follow_ups(&self, username: &str) -> Result<Vec<Lead>, DbError> {
        let leads = sqlx::query_as(
            r#"
            SELECT id, store_name, store_type, store_location, contact_no,
                   employee_name, status, remark, follow_up_date, is_followed_up
            FROM leads
            WHERE LOWER(employee_name) = LOWER(?)
            AND date(follow_up_date) <= date('now')
            AND is_followed_up = 0
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    async fn create_lead(&self, lead: &NewLead) -> Result<i64, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leads (store_name, store_type, store_location, contact_no,
                               employee_name, status, remark, follow_up_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&lead.store_name)
        .bind(&lead.store_type)
        .bind(&lead.store_location)
        .bind(&lead.contact_no)
        .bind(&lead.employee_name)
        .bind(&lead.status)
        .bind(lead.remark.as_deref())
        .bind(lead.follow_up_date)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update_lead(&self, id: i64, lead: &NewLead) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE leads
            SET store_name = ?, store_type = ?, store_location = ?, contact_no = ?,
                employee_name = ?, status = ?, remark = ?, follow_up_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&lead.store_name)
        .bind(&lead.store_type)
        .bind(&lead.store_location)
        .bind(&lead.contact_no)
        .bind(&lead.employee_name)
        .bind(&lead.status)
        .bind(lead.remark.as_deref())
        .bind(lead.follow_up_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "lead",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_lead(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "lead",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn set_followed_up(&self, id: i64, followed_up: bool) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE leads SET is_followed_up = ? WHERE id = ?")
            .bind(followed_up)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "lead",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
