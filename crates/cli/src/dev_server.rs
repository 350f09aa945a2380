//! Local development server started by `vx serve`.
//!
//! Exposes the resolved RPC settings and the hosted API endpoint map so
//! local tooling can discover them over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::context::CliContext;
use crate::endpoints::ApiEndpoints;
use crate::rpc_config::{LoadedConfig, Port};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
}

impl DevServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 4000;

    /// Build from the raw `VX_DEV_HOST` / `VX_DEV_PORT` values.
    pub fn from_values(host: Option<&str>, port: Option<&str>) -> anyhow::Result<Self> {
        let port = match port {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("VX_DEV_PORT must be a valid u16, got {raw:?}"))?,
            None => Self::DEFAULT_PORT,
        };
        Ok(Self {
            host: host.unwrap_or(Self::DEFAULT_HOST).to_string(),
            port,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip = self
            .host
            .parse()
            .with_context(|| format!("Invalid VX_DEV_HOST address {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Shared state for the dev server handlers.
#[derive(Clone)]
pub struct DevState {
    pub loaded: Arc<LoadedConfig>,
    pub endpoints: Arc<ApiEndpoints>,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct RpcResponse {
    pub protocol: String,
    pub host: String,
    pub port: Port,
    pub url: String,
    pub config_path: String,
}

async fn health(State(state): State<DevState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version,
    })
}

async fn rpc(State(state): State<DevState>) -> Json<RpcResponse> {
    let config = &state.loaded.config;
    Json(RpcResponse {
        protocol: config.protocol.clone(),
        host: config.host.clone(),
        port: config.port.clone(),
        url: config.url(),
        config_path: state.loaded.path.display().to_string(),
    })
}

async fn endpoints(State(state): State<DevState>) -> Json<ApiEndpoints> {
    Json(state.endpoints.as_ref().clone())
}

pub fn router(state: DevState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rpc", get(rpc))
        .route("/endpoints", get(endpoints))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the dev server and run it until Ctrl-C or SIGTERM.
pub async fn serve(
    ctx: &CliContext,
    dev: &DevServerConfig,
    loaded: LoadedConfig,
) -> anyhow::Result<()> {
    let addr = dev.socket_addr()?;
    let url = loaded.config.url();
    tracing::info!(config = %loaded.path.display(), rpc = %url, "Using RPC config");

    let state = DevState {
        loaded: Arc::new(loaded),
        endpoints: Arc::new(ctx.endpoints.clone()),
        version: ctx.version,
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Dev server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Dev server error")?;

    tracing::info!("Dev server stopped");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
