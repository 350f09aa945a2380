//! Bearer-session extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::Serialize;
use vx_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a verified bearer token.
///
/// Taking it as a handler argument is what makes a route private: the
/// request is rejected with 401 before the handler runs.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| CoreError::unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| CoreError::unauthorized("Malformed Authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CoreError::unauthorized("Expected: Bearer <token>"))
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers)?;

        let claims = state.config.jwt.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            CoreError::unauthorized("Invalid or expired token")
        })?;

        Ok(SessionUser {
            id: claims.sub,
            role: claims.role,
            email: claims.email,
        })
    }
}
