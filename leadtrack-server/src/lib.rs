//! leadtrack-server: HTTP API for sales-lead tracking
//!
//! Exposes user accounts (registration, login, CRUD) and lead records
//! (CRUD, filtering, follow-up tracking) over HTTP/JSON, backed by either
//! PostgreSQL or SQLite through a common storage trait.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use http::server::{build_router, run_server, ServerOptions};
pub use state::AppState;
