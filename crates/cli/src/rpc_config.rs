//! Locating and reading the RPC endpoint descriptor (`vx.config.json`).
//!
//! The file is a JSON object `{ "protocol", "host", "port" }`, authored
//! outside this tool. It is read once per invocation.
//!
//! Search order when no explicit path is given:
//!
//! 1. `./vx.config.json`
//! 2. `./.vx/vx.config.json`
//! 3. `./config/vx.config.json`
//! 4. `<user config dir>/vx/vx.config.json`
//!
//! An explicit path (relative to the working directory, or absolute) is the
//! only candidate; it never falls back to the list above.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "vx.config.json";

/// Port as written in the file. Any JSON number or string is accepted and
/// reproduced verbatim; nothing is range-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{n}"),
            Port::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    pub protocol: String,
    pub host: String,
    pub port: Port,
}

impl RpcConfig {
    /// Starter config written by `vx init`: a local node on the default
    /// JSON-RPC port.
    pub fn local_default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            port: Port::Number(serde_json::Number::from(8545u64)),
        }
    }

    /// `{protocol}://{host}:{port}`, verbatim.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// A config together with the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: RpcConfig,
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum RpcConfigError {
    #[error("Error reading {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error parsing {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No usable {DEFAULT_CONFIG_FILE} found (tried {})", display_paths(tried))]
    NotFound {
        tried: Vec<PathBuf>,
        #[source]
        last: Option<Box<RpcConfigError>>,
    },

    #[error("Cannot determine the working directory: {0}")]
    WorkingDir(io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Candidate files to try, in order.
pub fn candidate_paths(
    explicit: Option<&Path>,
    cwd: &Path,
    config_dir: Option<&Path>,
) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![cwd.join(path)];
    }

    let mut paths = vec![
        cwd.join(DEFAULT_CONFIG_FILE),
        cwd.join(".vx").join(DEFAULT_CONFIG_FILE),
        cwd.join("config").join(DEFAULT_CONFIG_FILE),
    ];
    if let Some(dir) = config_dir {
        paths.push(dir.join("vx").join(DEFAULT_CONFIG_FILE));
    }
    paths
}

/// Read and parse a single config file.
pub fn load_file(path: &Path) -> Result<RpcConfig, RpcConfigError> {
    let content = fs::read_to_string(path).map_err(|source| RpcConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RpcConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Return the first candidate that reads and parses.
///
/// A single candidate reports its own error; several candidates report
/// [`RpcConfigError::NotFound`] with the last failure as the source.
pub fn load_first(candidates: &[PathBuf]) -> Result<LoadedConfig, RpcConfigError> {
    let mut last_err = None;

    for path in candidates {
        match load_file(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded RPC config");
                return Ok(LoadedConfig {
                    config,
                    path: path.clone(),
                });
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Skipping config candidate");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(err) if candidates.len() == 1 => Err(err),
        last => Err(RpcConfigError::NotFound {
            tried: candidates.to_vec(),
            last: last.map(Box::new),
        }),
    }
}

/// Load the RPC config from `explicit`, or from the default search order.
pub fn load_rpc_config(explicit: Option<&Path>) -> Result<LoadedConfig, RpcConfigError> {
    let cwd = std::env::current_dir().map_err(RpcConfigError::WorkingDir)?;
    let config_dir = dirs::config_dir();
    load_first(&candidate_paths(explicit, &cwd, config_dir.as_deref()))
}

/// Load the config and compose its connection URL.
pub fn resolve_rpc_url(explicit: Option<&Path>) -> Result<String, RpcConfigError> {
    Ok(load_rpc_config(explicit)?.config.url())
}
