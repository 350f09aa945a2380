//! Maps scanned arguments to the command to run.

use std::path::PathBuf;

use crate::args::ParsedArgs;

/// Version flags, honoured anywhere on the command line.
const VERSION_FLAGS: [&str; 2] = ["--version", "-v"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    /// Write a starter config file (to `path`, or `vx.config.json` in the cwd).
    Init { path: Option<PathBuf> },
    /// Start the local development server.
    Serve { config_path: Option<PathBuf> },
    /// Print the resolved RPC URL.
    Rpc { config_path: Option<PathBuf> },
    /// Print the node's latest block number.
    Block { config_path: Option<PathBuf> },
    /// Print the ether balance of `address`.
    Balance {
        config_path: Option<PathBuf>,
        address: Option<String>,
    },
    Unknown(String),
}

impl Command {
    /// Pick the command for a parsed command line.
    ///
    /// A version flag anywhere wins over every command. With no command
    /// token at all the result is [`Command::Help`].
    pub fn resolve(parsed: &ParsedArgs) -> Self {
        if VERSION_FLAGS.iter().any(|flag| parsed.has_flag(flag)) {
            return Command::Version;
        }

        let config_path = parsed.config_path.clone();
        match parsed.command.as_deref() {
            None | Some("help") => Command::Help,
            Some("init") => Command::Init { path: config_path },
            Some("serve") => Command::Serve { config_path },
            Some("rpc") => Command::Rpc { config_path },
            Some("block") => Command::Block { config_path },
            Some("balance") => Command::Balance {
                config_path,
                address: parsed.positionals.first().cloned(),
            },
            Some(other) => Command::Unknown(other.to_string()),
        }
    }
}
