//! The `vx` command-line tool.
//!
//! - [`args`] / [`command`] -- argv parsing and command selection.
//! - [`rpc_config`] -- locating and reading `vx.config.json`.
//! - [`dev_server`] -- the local development server behind `vx serve`.
//! - [`chain`] -- JSON-RPC lookups against the configured node.
//! - [`endpoints`] -- the hosted VX API endpoint map.
//! - [`commands`] -- executes a resolved command and maps it to an exit code.

pub mod args;
pub mod chain;
pub mod command;
pub mod commands;
pub mod context;
pub mod dev_server;
pub mod endpoints;
pub mod rpc_config;
