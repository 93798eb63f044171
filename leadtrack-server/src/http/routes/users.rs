//! User account endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use leadtrack_core::password;

use super::Message;
use crate::http::error::ApiError;
use crate::models::{validation, NewUser, User};
use crate::state::AppState;

/// Registration / overwrite request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub occupation: Option<String>,
}

impl UserPayload {
    /// Validate required fields and hash the password.
    ///
    /// `occupation` is only mandatory on overwrite; registration accepts
    /// an account without one.
    fn into_new_user(self, occupation_required: bool) -> Result<NewUser, ApiError> {
        let name = validation::require("name", self.name)?;
        let username = validation::require("userName", self.user_name)?;
        let password = validation::require("password", self.password)?;
        let occupation = if occupation_required {
            Some(validation::require("occupation", self.occupation)?)
        } else {
            self.occupation.filter(|o| !o.trim().is_empty())
        };

        let password_hash = password::hash(&password)?;
        Ok(NewUser {
            name,
            username,
            password_hash,
            occupation,
        })
    }
}

/// User response; the stored password hash never serializes out
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub user_name: String,
    pub occupation: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            user_name: u.username,
            occupation: u.occupation,
        }
    }
}

/// POST /api/user - register a new account
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserPayload>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let new_user = req.into_new_user(false)?;

    // Uniqueness is checked here, deliberately not by a schema constraint
    if state
        .store
        .find_user_by_username(&new_user.username)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateUsername);
    }

    let id = state.store.create_user(&new_user).await?;
    tracing::info!(user = %new_user.username, id, "registered user");

    Ok((
        StatusCode::CREATED,
        Json(Message {
            message: "user created successfully",
        }),
    ))
}

/// GET /api/user - list all users
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/user/{id} - fetch one user
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.store.get_user(id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/user/{id} - full overwrite, including password re-hash
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UserPayload>,
) -> Result<Json<Message>, ApiError> {
    let user = req.into_new_user(true)?;
    state.store.update_user(id, &user).await?;
    Ok(Json(Message {
        message: "user updated successfully",
    }))
}

/// DELETE /api/user/{id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    state.store.delete_user(id).await?;
    Ok(Json(Message {
        message: "user deleted successfully",
    }))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user", get(list_users).post(register))
        .route(
            "/api/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
