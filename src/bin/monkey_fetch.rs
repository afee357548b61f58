//! One-shot retrieval from the tool server.
//!
//! Prints records as NDJSON (one compact object per line) or as a table.
//! By default a failed call degrades to empty output with a logged warning,
//! matching the console; `--strict` turns the failure into exit code 1 for
//! scripts that need to tell "no monkeys" from "no server".

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use monkeydb::display::render_table;
use monkeydb::{ConfigOverrides, Record, RecordSource, Retriever, RetrieverConfig, logging};

#[derive(Parser, Debug)]
#[command(name = "monkey-fetch")]
#[command(about = "Fetch monkey records from the configured tool server")]
struct Cli {
    /// Look up a single monkey by name instead of listing all.
    #[arg(long, conflicts_with = "journey")]
    name: Option<String>,
    /// Print the journey notes for this monkey.
    #[arg(long)]
    journey: Option<String>,
    /// Output format for records.
    #[arg(long, value_enum, default_value_t = Format::Ndjson)]
    format: Format,
    /// Exit non-zero when the server call fails.
    #[arg(long)]
    strict: bool,
    /// Server command line (whitespace separated, no shell). Overrides MONKEYDB_SERVER.
    #[arg(long)]
    server: Option<String>,
    /// Seconds to wait for the server; 0 waits forever. Overrides MONKEYDB_TIMEOUT_SECS.
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Ndjson,
    Table,
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
        server: cli.server.clone(),
        timeout_secs: cli.timeout,
    })?;
    let retriever = Retriever::new(config);

    if let Some(name) = cli.journey.as_deref() {
        let journey = if cli.strict {
            retriever
                .try_journey(name)
                .with_context(|| format!("fetching journey for '{name}'"))?
        } else {
            retriever.journey(name)
        };
        if let Some(text) = journey {
            println!("{text}");
        }
        return Ok(());
    }

    let records: Vec<Record> = match (cli.name.as_deref(), cli.strict) {
        (Some(name), true) => retriever
            .try_find_record(name)
            .with_context(|| format!("looking up '{name}'"))?
            .into_iter()
            .collect(),
        (Some(name), false) => retriever.find_record(name).into_iter().collect(),
        (None, true) => retriever.try_list_records().context("listing monkeys")?,
        (None, false) => retriever.list_records(),
    };

    match cli.format {
        Format::Ndjson => {
            for record in &records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        Format::Table => print!("{}", render_table(&records)),
    }
    Ok(())
}
