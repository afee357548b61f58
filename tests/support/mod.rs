#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use monkeydb::{CommandSpec, Retriever, RetrieverConfig};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::Duration;
use tempfile::TempDir;

// A throwaway server implemented as a shell script. The script runs through
// /bin/sh rather than being exec'd directly, which avoids ETXTBSY races when
// tests write and launch scripts in parallel.
pub struct ScriptServer {
    _dir: TempDir,
    pub path: PathBuf,
}

impl ScriptServer {
    pub fn new(body: &str) -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate script dir")?;
        let path = dir.path().join("server.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(Self { _dir: dir, path })
    }

    /// A script that swallows the request and prints `stdout` verbatim.
    pub fn replying(stdout: &str) -> Result<Self> {
        Self::new(&format!("cat >/dev/null\ncat <<'MONKEYDB_EOF'\n{stdout}\nMONKEYDB_EOF"))
    }

    pub fn command(&self) -> CommandSpec {
        CommandSpec::new("/bin/sh", [self.path.as_os_str()])
    }

    pub fn retriever(&self) -> Retriever {
        retriever_for(self.command(), Some(Duration::from_secs(10)))
    }

    pub fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn retriever_for(command: CommandSpec, timeout: Option<Duration>) -> Retriever {
    Retriever::new(RetrieverConfig { command, timeout })
}

pub fn stub_server_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_monkey-stub-server"))
}

pub fn stub_retriever() -> Retriever {
    retriever_for(
        CommandSpec::new(stub_server_path(), Vec::<String>::new()),
        Some(Duration::from_secs(10)),
    )
}

pub fn fetch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_monkey-fetch"))
}

pub fn console_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_monkeydb"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute {:?}", cmd.get_program()))?;
    if !output.status.success() {
        bail!(
            "{:?} exited with {:?}: {}",
            cmd.get_program(),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
