//! Verification of session tokens minted by the auth service.
//!
//! Tokens are HS256 JWTs signed with the secret shared with the auth
//! service (`JWT_SECRET`). This server never issues them.

use anyhow::Context;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Default clock-skew allowance when checking `exp`.
const DEFAULT_LEEWAY_SECS: u64 = 60;

/// Claims this server reads from a session token. Unknown claims are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The user's id in the auth service.
    pub sub: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

fn default_role() -> String {
    "user".to_string()
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub leeway_secs: u64,
}

impl JwtConfig {
    /// | Env var           | Default  |
    /// |-------------------|----------|
    /// | `JWT_SECRET`      | required |
    /// | `JWT_LEEWAY_SECS` | `60`     |
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let leeway_secs = match std::env::var("JWT_LEEWAY_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("JWT_LEEWAY_SECS must be a whole number, got {raw:?}"))?,
            Err(_) => DEFAULT_LEEWAY_SECS,
        };

        Ok(Self {
            secret,
            leeway_secs,
        })
    }

    /// Check the signature and expiry of `token` and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}
