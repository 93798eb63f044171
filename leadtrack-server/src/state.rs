//! Application state shared across handlers

use std::sync::Arc;

use chrono::Duration;
use leadtrack_core::TokenKeys;

use crate::db::Store;

/// Shared application state
pub struct AppState {
    /// Storage backend (PostgreSQL or SQLite)
    pub store: Arc<dyn Store>,
    /// Token signing/verification keys
    pub keys: TokenKeys,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, keys: TokenKeys, token_ttl_hours: i64) -> Self {
        Self {
            store,
            keys,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }
}
