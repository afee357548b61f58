//! Interactive monkey browser.
//!
//! Builds the bundled catalog once, resolves the server command (flag, then
//! `MONKEYDB_SERVER`, then the docker default), and runs the menu on the
//! terminal. Server failures are logged to stderr and shown as empty results.

use anyhow::Result;
use clap::Parser;
use monkeydb::{Catalog, ConfigOverrides, Console, Retriever, RetrieverConfig, logging};
use std::io;

#[derive(Parser, Debug)]
#[command(name = "monkeydb")]
#[command(about = "Browse the monkey catalog, optionally enriched from a tool server")]
struct Cli {
    /// Server command line (whitespace separated, no shell). Overrides MONKEYDB_SERVER.
    #[arg(long)]
    server: Option<String>,
    /// Seconds to wait for the server; 0 waits forever. Overrides MONKEYDB_TIMEOUT_SECS.
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init("warn");

    let config = RetrieverConfig::resolve(&ConfigOverrides {
        server: cli.server,
        timeout_secs: cli.timeout,
    })?;
    let catalog = Catalog::builtin();
    let retriever = Retriever::new(config);

    let mut console = Console::new(
        &catalog,
        &retriever,
        io::stdin().lock(),
        io::stdout().lock(),
        rand::rng(),
    );
    console.run()
}
