//! Local stand-in for the monkey tool server.
//!
//! Reads one `tools/call` request from stdin (everything up to EOF), writes
//! the JSON reply on stdout, and exits 0. Input that is not a request at all
//! is reported on stderr with exit code 1, which the retriever surfaces as a
//! process failure.

use anyhow::{Context, Result};
use monkeydb::stub;
use std::io::{self, Read};

fn main() {
    if let Err(err) = run() {
        eprintln!("monkey-stub-server: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut request = String::new();
    io::stdin()
        .read_to_string(&mut request)
        .context("reading request from stdin")?;
    let reply = stub::respond(&request)?;
    println!("{}", serde_json::to_string(&reply)?);
    Ok(())
}
