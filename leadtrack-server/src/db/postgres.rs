//! PostgreSQL backend - the networked variant
//!
//! Bounded connection pool, `$n` placeholders, `RETURNING id` for inserts.
//! Location filtering uses plain `LIKE` (case-sensitive, per Postgres);
//! employee-name matching is folded with `LOWER` on both sides.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{DbError, Store};
use crate::models::{Lead, LeadFilter, NewLead, NewUser, User};

/// Maximum connections for the pool.
const MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL store
#[derive(Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect with the default pool bounds.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn migrate(&self) -> Result<(), DbError> {
        tracing::info!("running schema bootstrap (postgres)");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
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
                id BIGSERIAL PRIMARY KEY,
                store_name TEXT NOT NULL,
                store_type TEXT NOT NULL,
                store_location TEXT NOT NULL,
                contact_no TEXT NOT NULL,
                employee_name TEXT NOT NULL,
                status TEXT NOT NULL,
                remark TEXT,
                follow_up_date TIMESTAMPTZ NOT NULL,
                is_followed_up BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_leads_employee ON leads (LOWER(employee_name))",
        )
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
            "SELECT id, name, username, password_hash, occupation FROM users WHERE id = $1",
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
            "SELECT id, name, username, password_hash, occupation FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> Result<i64, DbError> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, username, password_hash, occupation)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.occupation.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_user(&self, id: i64, user: &NewUser) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, username = $2, password_hash = $3, occupation = $4
            WHERE id = $5
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
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
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
                     WHERE store_location LIKE $1 \
                     AND LOWER(employee_name) LIKE LOWER($2) \
                     ORDER BY id"
                ))
                .bind(format!("%{location}%"))
                .bind(format!("%{employee}%"))
                .fetch_all(&self.pool)
                .await?
            }
            (Some(location), None) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM leads WHERE store_location LIKE $1 ORDER BY id"
                ))
                .bind(format!("%{location}%"))
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(employee)) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM leads \
                     WHERE LOWER(employee_name) LIKE LOWER($1) ORDER BY id"
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
            FROM leads WHERE id = $1
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
            WHERE LOWER(employee_name) = LOWER($1)
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
            WHERE LOWER(employee_name) = LOWER($1)
            AND follow_up_date::date = CURRENT_DATE
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
            WHERE LOWER(employee_name) = LOWER($1)
            AND follow_up_date::date <= CURRENT_DATE
            AND is_followed_up = FALSE
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    async fn create_lead(&self, lead: &NewLead) -> Result<i64, DbError> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO leads (store_name, store_type, store_location, contact_no,
                               employee_name, status, remark, follow_up_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
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
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_lead(&self, id: i64, lead: &NewLead) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE leads
            SET store_name = $1, store_type = $2, store_location = $3, contact_no = $4,
                employee_name = $5, status = $6, remark = $7, follow_up_date = $8
            WHERE id = $9
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
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
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
        let result = sqlx::query("UPDATE leads SET is_followed_up = $1 WHERE id = $2")
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
