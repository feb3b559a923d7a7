//! Take list persistence
//!
//! Stores the flat projection of the take tree and rebuilds the tree from it.

pub mod persistence;

pub use persistence::CsvTakeListStore;

use crate::error::ApiError;
use crate::record::TakeRecord;
use crate::tree::{AddTakeOutcome, TakeTree};
use std::path::Path;
use tracing::info;

/// Take list store interface
pub trait TakeListStore {
    /// Read every record, or fail without returning any of them.
    fn load(&self) -> Result<Vec<TakeRecord>, ApiError>;
    /// Replace the stored take list with `records`.
    fn save(&self, records: &[TakeRecord]) -> Result<(), ApiError>;
    fn path(&self) -> &Path;
}

/// Counts from rebuilding a tree out of stored records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Populate `tree` from `store`.
///
/// The whole file is parsed before the tree is touched, so a malformed file
/// leaves the tree exactly as it was.
pub fn load_into(tree: &mut TakeTree, store: &dyn TakeListStore) -> Result<LoadReport, ApiError> {
    let records = store.load()?;
    let mut report = LoadReport::default();
    for record in &records {
        match tree.insert_record(record) {
            AddTakeOutcome::Inserted(_) => report.inserted += 1,
            AddTakeOutcome::Duplicate(_) => report.duplicates += 1,
        }
    }
    info!(
        path = %store.path().display(),
        inserted = report.inserted,
        duplicates = report.duplicates,
        "Loaded take list"
    );
    Ok(report)
}

/// Flatten `tree` and write it to `store`.
pub fn save_tree(tree: &TakeTree, store: &dyn TakeListStore) -> Result<usize, ApiError> {
    let records = tree.flatten();
    store.save(&records)?;
    Ok(records.len())
}
