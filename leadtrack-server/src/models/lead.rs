//! Sales lead records and list filtering

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Lead record from the database
#[derive(Debug, Clone, FromRow)]
pub struct Lead {
    pub id: i64,
    pub store_name: String,
    pub store_type: String,
    pub store_location: String,
    pub contact_no: String,
    /// Free text, matched case-insensitively against usernames.
    /// Deliberately not a foreign key.
    pub employee_name: String,
    pub status: String,
    pub remark: Option<String>,
    pub follow_up_date: DateTime<Utc>,
    pub is_followed_up: bool,
}

/// Validated lead data for insert/overwrite
#[derive(Debug, Clone)]
pub struct NewLead {
    pub store_name: String,
    pub store_type: String,
    pub store_location: String,
    pub contact_no: String,
    pub employee_name: String,
    pub status: String,
    pub remark: Option<String>,
    pub follow_up_date: DateTime<Utc>,
}

/// Optional substring filters for lead listing.
///
/// Blank or absent parameters mean "no filter" on that axis.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub store_location: Option<String>,
    pub employee_name: Option<String>,
}

impl LeadFilter {
    /// Normalize raw query parameters: trim, and treat blank as absent.
    pub fn new(store_location: Option<String>, employee_name: Option<String>) -> Self {
        Self {
            store_location: normalize(store_location),
            employee_name: normalize(employee_name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.store_location.is_none() && self.employee_name.is_none()
    }
}

fn normalize(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
