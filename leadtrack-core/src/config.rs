//! Application configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: connection string; the URL scheme selects the backend
//!   (`postgres://...` for the pooled networked variant, `sqlite://...` for
//!   the embedded single-connection variant)
//! - `JWT_SECRET`: shared secret for signing and verifying bearer tokens
//! - `LEADTRACK_HOST`: bind address (default: 127.0.0.1)
//! - `PORT`: bind port (default: 5000)
//! - `LEADTRACK_TOKEN_TTL_HOURS`: issued-token lifetime (default: 10)

use std::env;

use crate::error::{CoreError, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address for the HTTP server
    pub host: String,

    /// Bind port for the HTTP server
    pub port: u16,

    /// Database connection string
    pub database_url: String,

    /// Shared secret for bearer tokens
    pub jwt_secret: String,

    /// Lifetime of issued tokens, in hours
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// Create config from environment variables.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a
    /// default.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| CoreError::MissingEnv { name: "DATABASE_URL" })?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| CoreError::MissingEnv { name: "JWT_SECRET" })?;

        let host = env::var("LEADTRACK_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| CoreError::config(format!("PORT is not a valid port: '{raw}'")))?,
            Err(_) => DEFAULT_PORT,
        };

        let token_ttl_hours = match env::var("LEADTRACK_TOKEN_TTL_HOURS") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| {
                CoreError::config(format!("LEADTRACK_TOKEN_TTL_HOURS is not a number: '{raw}'"))
            })?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            token_ttl_hours,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn with_values(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }

    /// Bind address as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
