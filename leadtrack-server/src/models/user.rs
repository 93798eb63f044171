//! User account records

use sqlx::FromRow;

/// User record from the database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub occupation: Option<String>,
}

/// Validated user data for insert/overwrite.
///
/// The password is already hashed by the time it reaches the store; plain
/// passwords never cross the storage seam.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub occupation: Option<String>,
}
