//! leadtrack-core: configuration and credential primitives
//!
//! Shared by the server and CLI crates:
//! - Environment-driven configuration (`AppConfig`)
//! - JWT signing and verification (`TokenKeys`)
//! - Password hashing (argon2id)

pub mod config;
pub mod error;
pub mod jwt;
pub mod password;

pub use config::AppConfig;
pub use error::{CoreError, Result};
pub use jwt::{Claims, TokenKeys};
