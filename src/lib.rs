//! Monkey catalog browser.
//!
//! The crate pairs a fixed, read-only `Catalog` with a `Retriever` that asks
//! an external stdio tool server for more records. Server trouble never
//! escapes the retriever's plain operations: they log and return nothing, so
//! the console keeps working with the local catalog alone.

pub mod catalog;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod logging;
pub mod record;
pub mod retriever;
pub mod stub;

pub use catalog::{BUILTIN_SIZE, Catalog};
pub use config::{CommandSpec, ConfigOverrides, RetrieverConfig};
pub use console::{Console, MenuChoice};
pub use error::{CatalogError, FailureKind, RetrieveError};
pub use record::{Coordinates, ExternalRecord, Record, species_for_name};
pub use retriever::{RecordSource, Retriever};

/// Split a command line on whitespace. Quotes have no special meaning.
pub fn split_command(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
