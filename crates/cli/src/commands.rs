//! Command execution and exit-code mapping.
//!
//! Output goes through the supplied writers so the whole flow can be driven
//! from tests. Nothing here terminates the process.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::args::ParsedArgs;
use crate::chain::ChainClient;
use crate::command::Command;
use crate::context::CliContext;
use crate::dev_server;
use crate::rpc_config::{self, RpcConfig, DEFAULT_CONFIG_FILE};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

pub const USAGE: &str = "\
Usage: vx <command> [options]

Commands:
  init                 Create a starter vx.config.json
  serve                Start the local dev server using the RPC config
  rpc                  Print the RPC URL from the config
  block                Print the latest block number from the RPC node
  balance <address>    Print the balance of an address, in ether
  help                 Show this help

Options:
  -p, --path <file>    Use this config file instead of searching for vx.config.json
  -v, --version        Print the version

Examples:
  vx serve
  vx serve -p custom.json
  vx balance 0x0000000000000000000000000000000000000000 -p config/vx.config.json
";

/// Run one invocation of the CLI and return its exit code.
pub async fn run<O: Write, E: Write>(
    ctx: &CliContext,
    args: &[String],
    out: &mut O,
    err: &mut E,
) -> u8 {
    let parsed = match ParsedArgs::parse(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            return EXIT_FAILURE;
        }
    };

    let command = Command::resolve(&parsed);
    tracing::debug!(?command, "Resolved command");

    match execute(ctx, command, out, err).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            let _ = writeln!(err, "Error: {e:#}");
            EXIT_FAILURE
        }
    }
}

async fn execute<O: Write, E: Write>(
    ctx: &CliContext,
    command: Command,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<u8> {
    match command {
        Command::Help => {
            out.write_all(USAGE.as_bytes())?;
            Ok(EXIT_OK)
        }
        Command::Version => {
            writeln!(out, "VX version: {}", ctx.version)?;
            Ok(EXIT_OK)
        }
        Command::Unknown(name) => {
            writeln!(err, "Unknown command: {name}")?;
            out.write_all(USAGE.as_bytes())?;
            Ok(EXIT_FAILURE)
        }
        Command::Init { path } => {
            let target = init_config(path.as_deref())?;
            writeln!(out, "Created {}", target.display())?;
            Ok(EXIT_OK)
        }
        Command::Rpc { config_path } => {
            let url = rpc_config::resolve_rpc_url(config_path.as_deref())?;
            writeln!(out, "RPC : {url}")?;
            Ok(EXIT_OK)
        }
        Command::Block { config_path } => {
            let client = chain_client(config_path.as_deref())?;
            let block = client.block_number().await?;
            writeln!(out, "Block number: {block}")?;
            Ok(EXIT_OK)
        }
        Command::Balance {
            config_path,
            address,
        } => {
            let client = chain_client(config_path.as_deref())?;
            let address = address.unwrap_or_default();
            let balance = client.balance(&address).await?;
            writeln!(out, "Balance of {address}: {balance} ETH")?;
            Ok(EXIT_OK)
        }
        Command::Serve { config_path } => {
            let dev = ctx.dev_server_config()?;
            let loaded = rpc_config::load_rpc_config(config_path.as_deref())?;
            writeln!(out, "RPC : {}", loaded.config.url())?;
            writeln!(out, "Dev server on http://{}:{}", dev.host, dev.port)?;
            out.flush()?;
            dev_server::serve(ctx, &dev, loaded).await?;
            Ok(EXIT_OK)
        }
    }
}

fn chain_client(config_path: Option<&Path>) -> anyhow::Result<ChainClient> {
    let url = rpc_config::resolve_rpc_url(config_path)?;
    Ok(ChainClient::new(url)?)
}

/// Write the starter config to `path` (default: `./vx.config.json`).
///
/// Fails if the file already exists.
fn init_config(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir().context("Cannot determine the working directory")?;
    let target = cwd.join(path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE)));

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            anyhow::bail!("{} already exists", target.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", target.display()));
        }
    };

    let mut content = serde_json::to_string_pretty(&RpcConfig::local_default())?;
    content.push('\n');
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", target.display()))?;

    tracing::info!(path = %target.display(), "Wrote starter config");
    Ok(target)
}
