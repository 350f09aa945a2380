//! Raw argv scanning.
//!
//! The grammar is deliberately loose: the first token is the command, the
//! `-p`/`--path` option may appear anywhere and takes the next token as
//! its value, any other `-`-prefixed token is kept as a unary flag, and
//! the remaining bare tokens are positional arguments.

use std::path::PathBuf;

/// Short and long spelling of the config path option.
const PATH_FLAGS: [&str; 2] = ["-p", "--path"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Please provide a path after {0}")]
    MissingPathValue(String),
}

/// Result of scanning the command line (program name excluded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// First token, unless it is the path option.
    pub command: Option<String>,
    /// Value following `-p` / `--path`. The last occurrence wins.
    pub config_path: Option<PathBuf>,
    /// Other `-`-prefixed tokens, in order.
    pub flags: Vec<String>,
    /// Bare tokens after the command.
    pub positionals: Vec<String>,
}

impl ParsedArgs {
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, ArgsError> {
        let mut parsed = ParsedArgs::default();
        let mut tokens = args.iter().map(AsRef::as_ref).enumerate();

        while let Some((index, token)) = tokens.next() {
            if PATH_FLAGS.contains(&token) {
                let (_, value) = tokens
                    .next()
                    .ok_or_else(|| ArgsError::MissingPathValue(token.to_string()))?;
                parsed.config_path = Some(PathBuf::from(value));
            } else if index == 0 {
                parsed.command = Some(token.to_string());
            } else if token.starts_with('-') {
                parsed.flags.push(token.to_string());
            } else {
                parsed.positionals.push(token.to_string());
            }
        }

        Ok(parsed)
    }

    /// Whether `flag` was given, either as the command token or as a flag.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.command.as_deref() == Some(flag) || self.flags.iter().any(|f| f == flag)
    }
}
