//! HTTP surface of the VX project registry.
//!
//! The binary in `main.rs` and the integration tests both build the server
//! through [`router::build_app_router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
