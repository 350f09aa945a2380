//! Error type returned by every handler and its JSON rendering.
//!
//! Every failure becomes `{ "error": <message>, "code": <CODE> }`. Database
//! details never reach the client: anything that is not a recognised
//! constraint violation is logged and reported as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use vx_core::error::CoreError;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl AppError {
    /// HTTP status and body for this error.
    fn render(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Core(err @ CoreError::NotFound { .. }) => {
                body(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            AppError::Core(CoreError::Validation(msg)) => {
                body(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                body(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Database(err) => render_database_error(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.render();
        (status, Json(body)).into_response()
    }
}

fn body(status: StatusCode, code: &'static str, error: String) -> (StatusCode, ErrorBody) {
    (status, ErrorBody { error, code })
}

fn internal() -> (StatusCode, ErrorBody) {
    body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Missing rows are 404, violations of `uq_*` constraints and foreign keys
/// are 409, the rest is a sanitized 500.
fn render_database_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    if let sqlx::Error::RowNotFound = err {
        return body(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or_default();
        match db_err.code().as_deref() {
            Some(PG_UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
                return body(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates {constraint}"),
                );
            }
            Some(PG_FOREIGN_KEY_VIOLATION) => {
                return body(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "Operation conflicts with a related record".to_string(),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Unhandled database error");
    internal()
}
