use std::sync::Arc;

use crate::config::ServerConfig;

/// Handler state. Cloned per request, so everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    pub pool: vx_db::DbPool,
    pub config: Arc<ServerConfig>,
}
