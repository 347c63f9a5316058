//! Storage layer for scout
//!
//! The search core only needs read snapshots of resumes; [`RecordStore`]
//! is that seam. [`Database`] persists resumes in SQLite and
//! [`MemoryStore`] keeps them in a `Vec` for tests and embedding.

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::Database;

use crate::core::{Record, RecordId};
use crate::error::Result;

/// Source of resume snapshots for indexing and result hydration.
pub trait RecordStore {
    /// Every stored record, in ascending id order.
    fn list_all_records(&self) -> Result<Vec<Record>>;

    /// Records for the given ids, in ascending id order. Unknown ids are
    /// skipped.
    fn get_records_by_id(&self, ids: &[RecordId]) -> Result<Vec<Record>>;

    /// Called after an index build that embedded `count` records with
    /// `dims`-dimensional vectors.
    fn record_index_build(&self, _dims: usize, _count: usize) -> Result<()> {
        Ok(())
    }
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn list_all_records(&self) -> Result<Vec<Record>> {
        (**self).list_all_records()
    }

    fn get_records_by_id(&self, ids: &[RecordId]) -> Result<Vec<Record>> {
        (**self).get_records_by_id(ids)
    }

    fn record_index_build(&self, dims: usize, count: usize) -> Result<()> {
        (**self).record_index_build(dims, count)
    }
}
