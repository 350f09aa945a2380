pub mod project;

use axum::routing::get;
use axum::Router;

use crate::handlers::{status, wallet};
use crate::state::AppState;

/// Every route the server answers, before middleware.
///
/// ```text
/// GET  /health                      service + database health (public)
///
/// /api/v1
///   GET  /health-check              plain "OK" (public)
///   GET  /wallet/config             wallet-connection settings (public)
///   GET  /private-data              session echo
///   /projects                       project procedures, see [`project::router`]
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(status::service_health))
        .nest("/api/v1", api_v1())
}

fn api_v1() -> Router<AppState> {
    Router::new()
        .route("/health-check", get(status::health_check))
        .route("/wallet/config", get(wallet::config))
        .route("/private-data", get(status::private_data))
        .nest("/projects", project::router())
}
