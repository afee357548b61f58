//! Server command and timeout resolution.
//!
//! Binaries should rely on this module instead of hard-coding the server
//! command line so the default, the `MONKEYDB_SERVER` override, and the CLI
//! flag all resolve the same way. Precedence is flag, then environment, then
//! the built-in docker invocation.

use crate::split_command;
use anyhow::{Context, Result, bail};
use std::env;
use std::env::VarError;
use std::ffi::OsString;
use std::time::Duration;

pub const ENV_SERVER_COMMAND: &str = "MONKEYDB_SERVER";
pub const ENV_TIMEOUT_SECS: &str = "MONKEYDB_TIMEOUT_SECS";

pub const DEFAULT_SERVER_PROGRAM: &str = "docker";
pub const DEFAULT_SERVER_ARGS: &[&str] = &["run", "-i", "--rm", "jamesmontemagno/monkeymcp"];
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Program plus argument vector; never interpreted by a shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a whitespace-separated command line. No quoting is supported.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = split_command(raw).into_iter();
        let Some(program) = parts.next() else {
            bail!("server command must not be empty");
        };
        Ok(Self::new(program, parts))
    }

    pub fn default_server() -> Self {
        Self::new(DEFAULT_SERVER_PROGRAM, DEFAULT_SERVER_ARGS.iter().copied())
    }

    /// Human-readable form for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrieverConfig {
    pub command: CommandSpec,
    /// `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            command: CommandSpec::default_server(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// Values supplied on the command line, if any.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub server: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl RetrieverConfig {
    /// Resolve against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, env_non_empty)
    }

    /// Resolve using `lookup` for environment values.
    pub fn resolve_with<F>(overrides: &ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = overrides
            .server
            .clone()
            .filter(|raw| !raw.trim().is_empty())
            .or_else(|| lookup(ENV_SERVER_COMMAND));
        let command = match server {
            Some(raw) => CommandSpec::parse(&raw)
                .with_context(|| format!("invalid server command {raw:?}"))?,
            None => CommandSpec::default_server(),
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => lookup(ENV_TIMEOUT_SECS)
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .with_context(|| format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
                })
                .transpose()?,
        };
        let timeout = match timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_TIMEOUT),
        };

        Ok(Self { command, timeout })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => None,
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(os)) => Some(os.to_string_lossy().into_owned()),
    }
}
