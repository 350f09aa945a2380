//! Minimal JSON-RPC client for the configured node.
//!
//! Only `eth_blockNumber` and `eth_getBalance` are needed by the CLI.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const WEI_PER_ETHER: f64 = 1e18;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid address: {0}")]
    InvalidAddress(&'static str),

    #[error("RPC request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("RPC node answered HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("RPC response for {0} has no result")]
    MissingResult(&'static str),

    #[error("Invalid hex quantity: {0}")]
    InvalidQuantity(String),
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Clone)]
pub struct ChainClient {
    client: reqwest::Client,
    url: String,
}

impl ChainClient {
    pub fn new(url: impl Into<String>) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Latest block height.
    pub async fn block_number(&self) -> Result<u64, ChainError> {
        let result = self.call("eth_blockNumber", json!([])).await?;
        let quantity = parse_quantity(&result)?;
        u64::try_from(quantity).map_err(|_| ChainError::InvalidQuantity(result))
    }

    /// Balance of `address` at the latest block, in ether.
    pub async fn balance(&self, address: &str) -> Result<f64, ChainError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ChainError::InvalidAddress("Address cannot be empty"));
        }

        let result = self
            .call("eth_getBalance", json!([address, "latest"]))
            .await?;
        Ok(wei_to_ether(parse_quantity(&result)?))
    }

    async fn call(&self, method: &'static str, params: Value) -> Result<String, ChainError> {
        let payload = json!({"jsonrpc": "2.0", "method": method, "params": params, "id": 1});
        tracing::debug!(url = %self.url, method, "JSON-RPC call");

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::HttpStatus(status));
        }

        let body: RpcResponse = response.json().await?;
        if let Some(err) = body.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        match body.result {
            Some(Value::String(s)) => Ok(s),
            _ => Err(ChainError::MissingResult(method)),
        }
    }
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(hex: &str) -> Result<u128, ChainError> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .ok_or_else(|| ChainError::InvalidQuantity(hex.to_string()))?;
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16).map_err(|_| ChainError::InvalidQuantity(hex.to_string()))
}

pub fn wei_to_ether(wei: u128) -> f64 {
    wei as f64 / WEI_PER_ETHER
}
