//! URLs of the hosted VX API.

use serde::Serialize;

pub const DEFAULT_API_SERVER: &str = "https://api.varius.technology";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiEndpoints {
    pub base: String,
    pub gas_price: String,
    pub block_number: String,
    pub balance: String,
    pub tx: String,
    pub txs: String,
}

impl ApiEndpoints {
    /// Build from `API_SERVER`, falling back to the public server.
    pub fn from_env() -> Self {
        let base = std::env::var("API_SERVER").unwrap_or_else(|_| DEFAULT_API_SERVER.to_string());
        Self::with_base(&base)
    }

    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            gas_price: format!("{base}/gasprice"),
            block_number: format!("{base}/blocknumber"),
            balance: format!("{base}/balance"),
            tx: format!("{base}/tx"),
            txs: format!("{base}/txs"),
            base,
        }
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::with_base(DEFAULT_API_SERVER)
    }
}
