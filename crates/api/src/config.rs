//! Server settings, read once from the environment at start-up.

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Context;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Browser origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub wallet: WalletConfig,
}

/// Public wallet-connection settings handed to browser clients.
#[derive(Debug, Clone, Default)]
pub struct WalletConfig {
    /// WalletConnect project id. `None` when unset or blank.
    pub wc_project_id: Option<String>,
}

impl WalletConfig {
    pub fn from_env() -> Self {
        let wc_project_id = std::env::var("NEXT_PUBLIC_WC_PROJECT_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self { wc_project_id }
    }
}

impl ServerConfig {
    /// | Env var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `DATABASE_URL`         | required                |
    /// | `CORS_ORIGINS`         | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    ///
    /// plus [`JwtConfig::from_env`] and [`WalletConfig::from_env`].
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 3000)?,
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3001".into()),
            ),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            jwt: JwtConfig::from_env()?,
            wallet: WalletConfig::from_env(),
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip = self
            .host
            .parse()
            .with_context(|| format!("HOST is not an IP address: {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Parse `key` if set, else use `default`.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
