//! Login endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use leadtrack_core::{password, Claims};

use crate::http::error::ApiError;
use crate::models::validation;
use crate::state::AppState;

/// Login request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// Login response carrying the issued bearer token
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
}

/// POST /login - verify credentials and issue a token
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user_name = validation::require("userName", req.user_name)?;
    let password = validation::require("password", req.password)?;

    let user = state
        .store
        .find_user_by_username(&user_name)
        .await?
        .ok_or(ApiError::InvalidCredentials {
            reason: "invalid user",
        })?;

    if !password::verify(&password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials {
            reason: "invalid password",
        });
    }

    let claims = Claims::new(&user.username, state.token_ttl);
    let jwt_token = state.keys.sign(&claims)?;

    tracing::debug!(user = %user.username, "issued token");
    Ok(Json(LoginResponse { jwt_token }))
}

/// Login routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}
