//! Indexed view of a monkey catalog.
//!
//! Lookups are linear: the catalog is small, order matters (first match
//! wins for duplicate names), and names are compared case-insensitively so a
//! map keyed by the raw name would not help.

use crate::catalog::builtin_records;
use crate::error::CatalogError;
use crate::record::{Record, names_match};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Read-only, ordered collection of records.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    /// The bundled dataset.
    pub fn builtin() -> Self {
        Self::from_records(builtin_records())
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Every record, in declaration order.
    pub fn list_all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a record by name.
    ///
    /// Matching is exact apart from case. Blank input is never searched and
    /// yields `None`.
    pub fn find_by_name(&self, name: &str) -> Option<&Record> {
        if name.trim().is_empty() {
            return None;
        }
        self.records.iter().find(|record| record.is_named(name))
    }

    /// Pick one record uniformly at random.
    pub fn random_pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Record, CatalogError> {
        self.records.choose(rng).ok_or(CatalogError::Empty)
    }

    /// A new catalog with `extra` appended after the local records.
    ///
    /// Entries from `extra` whose name already exists (case-insensitively)
    /// are skipped, so the local description always wins.
    pub fn merged_with(&self, extra: Vec<Record>) -> Catalog {
        let mut records = self.records.clone();
        for record in extra {
            if records.iter().any(|existing| names_match(&existing.name, &record.name)) {
                debug!(name = %record.name, "skipping duplicate record during merge");
                continue;
            }
            records.push(record);
        }
        Catalog { records }
    }
}
