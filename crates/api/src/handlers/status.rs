//! Liveness checks and the session echo.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::middleware::auth::SessionUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
pub async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    let db_healthy = match vx_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(ServiceHealth {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /api/v1/health-check
pub async fn health_check() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
pub struct PrivateData {
    pub message: &'static str,
    pub user: SessionUser,
}

/// GET /api/v1/private-data
pub async fn private_data(user: SessionUser) -> Json<PrivateData> {
    Json(PrivateData {
        message: "This is private",
        user,
    })
}
