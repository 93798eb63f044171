//! Route handlers organized by resource

pub mod health;
pub mod leads;
pub mod login;
pub mod users;

use serde::Serialize;

/// Plain acknowledgement body for mutations
#[derive(Serialize)]
pub struct Message {
    pub message: &'static str,
}
