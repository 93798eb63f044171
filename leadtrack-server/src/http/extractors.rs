//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::error::ApiError;
use crate::state::AppState;

/// The authenticated user's login name, pulled from the bearer token.
///
/// Rejections follow the flat auth mapping: 401 when no token is supplied,
/// 403 when the token fails signature or expiry checks.
pub struct AuthUser(pub String);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.split_whitespace().nth(1))
            .ok_or(ApiError::MissingToken)?;

        let claims = state.keys.verify(token).map_err(|_| ApiError::InvalidToken)?;
        Ok(Self(claims.sub))
    }
}
