//! In-memory exact inner-product index
//!
//! The index is rebuilt wholesale: `rebuild` prepares a complete snapshot
//! off to the side and swaps it in under a short write lock, while `search`
//! clones the current `Arc` under a read lock. A reader therefore sees
//! either the previous or the next index, never a partial one.

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::RecordId;
use crate::error::{Result, ScoutError};

use super::embeddings::dot_product;

/// Position-to-id mapping for one stored vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IndexEntry {
    position: usize,
    id: RecordId,
}

/// Immutable contents of one build.
#[derive(Debug, Default)]
struct IndexSnapshot {
    dims: usize,
    entries: Vec<IndexEntry>,
    /// Row-major `entries.len() x dims` matrix
    vectors: Vec<f32>,
}

impl IndexSnapshot {
    fn vector(&self, position: usize) -> &[f32] {
        let start = position * self.dims;
        &self.vectors[start..start + self.dims]
    }
}

/// Exact k-nearest-neighbour index over unit vectors.
#[derive(Debug, Default)]
pub struct VectorIndex {
    /// `None` until the first rebuild
    current: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl VectorIndex {
    /// Create an index that has never been built
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one rebuild has completed
    pub fn is_built(&self) -> bool {
        self.current.read().is_some()
    }

    /// Number of vectors in the current build
    pub fn len(&self) -> usize {
        self.current.read().as_ref().map_or(0, |s| s.entries.len())
    }

    /// Whether the current build holds no vectors
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension of the current build, `None` if unbuilt or empty
    pub fn dims(&self) -> Option<usize> {
        self.current
            .read()
            .as_ref()
            .filter(|s| !s.entries.is_empty())
            .map(|s| s.dims)
    }

    /// Replace the whole index with `entries`.
    ///
    /// All vectors must share one dimension. On error the previous build
    /// stays in place.
    pub fn rebuild(&self, entries: Vec<(RecordId, Vec<f32>)>) -> Result<()> {
        let dims = entries.first().map_or(0, |(_, v)| v.len());
        let mut snapshot = IndexSnapshot {
            dims,
            entries: Vec::with_capacity(entries.len()),
            vectors: Vec::with_capacity(entries.len() * dims),
        };

        for (position, (id, vector)) in entries.into_iter().enumerate() {
            if vector.len() != dims {
                return Err(ScoutError::DimensionMismatch {
                    expected: dims,
                    actual: vector.len(),
                });
            }
            snapshot.entries.push(IndexEntry { position, id });
            snapshot.vectors.extend_from_slice(&vector);
        }

        *self.current.write() = Some(Arc::new(snapshot));
        Ok(())
    }

    /// Top-`k` ids by inner product with `query`, best first. Equal scores
    /// are ordered by ascending id. Returns nothing when the index is
    /// unbuilt or empty.
    ///
    /// # Panics
    ///
    /// Panics if `query` does not have the indexed dimension. Both sides
    /// come from the same embedder, so a mismatch is a programming error.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(RecordId, f32)> {
        let Some(snapshot) = self.current.read().clone() else {
            return Vec::new();
        };
        if snapshot.entries.is_empty() || k == 0 {
            return Vec::new();
        }

        assert_eq!(
            query.len(),
            snapshot.dims,
            "query vector dimension does not match the index"
        );

        let mut scores: Vec<(RecordId, f32)> = snapshot
            .entries
            .iter()
            .map(|entry| (entry.id, dot_product(query, snapshot.vector(entry.position))))
            .collect();

        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scores.truncate(k);
        scores
    }

    /// Ids and vectors of the current build in insertion order
    pub fn contents(&self) -> Vec<(RecordId, Vec<f32>)> {
        let Some(snapshot) = self.current.read().clone() else {
            return Vec::new();
        };
        snapshot
            .entries
            .iter()
            .map(|entry| (entry.id, snapshot.vector(entry.position).to_vec()))
            .collect()
    }
}
