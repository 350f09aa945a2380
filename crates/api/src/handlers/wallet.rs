//! Wallet-connection settings for browser clients.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WalletConfigResponse {
    /// `null` when no WalletConnect project id is configured; clients then
    /// offer injected wallets only.
    pub wc_project_id: Option<String>,
}

/// GET /api/v1/wallet/config
pub async fn config(State(state): State<AppState>) -> Json<WalletConfigResponse> {
    Json(WalletConfigResponse {
        wc_project_id: state.config.wallet.wc_project_id.clone(),
    })
}
