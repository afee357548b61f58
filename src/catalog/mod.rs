//! Monkey catalog wiring.
//!
//! The catalog is the read-only reference set the console browses. It is
//! built once from the entries in `builtin` and handed around by reference;
//! merged views (local plus server records) are separate catalogs built with
//! `Catalog::merged_with`, never in-place edits.

pub mod builtin;
pub mod index;

pub use builtin::builtin_records;
pub use index::Catalog;

/// Number of entries in the bundled dataset.
pub const BUILTIN_SIZE: usize = 10;
