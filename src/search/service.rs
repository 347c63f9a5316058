//! Search service: index lifecycle plus the query pipeline

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::{MatchResult, Record, RecordId, StructuredRequirement};
use crate::error::Result;
use crate::storage::RecordStore;

use super::embeddings::{Embedder, build_embedder};
use super::query::QueryInterpreter;
use super::rerank::{Candidate, Reranker};
use super::vector_index::VectorIndex;

/// Default candidate oversampling before reranking
pub const DEFAULT_OVERSAMPLE: usize = 3;

/// Outcome of an index rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub dims: usize,
}

/// A match paired with the record it refers to
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch {
    pub record: Record,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Full answer to a query, for callers that display more than ids
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub requirement: StructuredRequirement,
    /// Candidates retrieved from the index before reranking
    pub candidates_considered: usize,
    pub matches: Vec<RankedMatch>,
}

/// Resume search over a record store.
pub struct SearchService<S: RecordStore> {
    store: S,
    embedder: Box<dyn Embedder>,
    index: VectorIndex,
    interpreter: QueryInterpreter,
    reranker: Reranker,
    oversample: usize,
    rebuild_lock: Mutex<()>,
}

impl<S: RecordStore> std::fmt::Debug for SearchService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("embedder", &self.embedder.name())
            .field("index", &self.index)
            .field("reranker", &self.reranker)
            .field("oversample", &self.oversample)
            .finish_non_exhaustive()
    }
}

impl<S: RecordStore> SearchService<S> {
    /// Service with the default vocabulary, weights and oversampling.
    pub fn new(store: S, embedder: Box<dyn Embedder>) -> Self {
        Self {
            store,
            embedder,
            index: VectorIndex::new(),
            interpreter: QueryInterpreter::default(),
            reranker: Reranker::default(),
            oversample: DEFAULT_OVERSAMPLE,
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Service wired from loaded configuration.
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        let embedder = build_embedder(&config.search)?;
        Ok(Self::new(store, embedder)
            .with_interpreter(QueryInterpreter::new(&config.vocabulary))
            .with_reranker(Reranker::with_weights(
                config.search.semantic_weight,
                config.search.skill_weight,
            ))
            .with_oversample(config.search.oversample_factor as usize))
    }

    #[must_use]
    pub fn with_interpreter(mut self, interpreter: QueryInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    #[must_use]
    pub fn with_reranker(mut self, reranker: Reranker) -> Self {
        self.reranker = reranker;
        self
    }

    /// Oversampling factor; clamped to at least 1.
    #[must_use]
    pub fn with_oversample(mut self, factor: usize) -> Self {
        self.oversample = factor.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn interpreter(&self) -> &QueryInterpreter {
        &self.interpreter
    }

    /// Re-embed every stored record and replace the index.
    ///
    /// Rebuilds are serialized; searches running meanwhile keep using the
    /// previous build.
    pub fn rebuild_index(&self) -> Result<IndexStats> {
        let _guard = self.rebuild_lock.lock();

        let records = self.store.list_all_records()?;
        let texts: Vec<&str> = records.iter().map(|r| r.raw_text.as_str()).collect();
        let vectors = self.embedder.embed(&texts)?;

        let entries: Vec<(RecordId, Vec<f32>)> =
            records.iter().map(|r| r.id).zip(vectors).collect();
        let stats = IndexStats {
            records: entries.len(),
            dims: self.embedder.dims(),
        };
        self.index.rebuild(entries)?;
        self.store.record_index_build(stats.dims, stats.records)?;

        info!(
            records = stats.records,
            dims = stats.dims,
            embedder = self.embedder.name(),
            "rebuilt resume index"
        );
        Ok(stats)
    }

    /// Ranked matches for a free-text query, at most `top_k` of them.
    pub fn find_matches(&self, query: &str, top_k: usize) -> Result<Vec<MatchResult>> {
        Ok(self
            .search(query, top_k)?
            .matches
            .into_iter()
            .map(|m| m.result)
            .collect())
    }

    /// Like [`find_matches`](Self::find_matches), keeping the parsed
    /// requirement and hydrated records.
    pub fn search(&self, query: &str, top_k: usize) -> Result<SearchReport> {
        let requirement = self.interpreter.parse(query);
        let mut report = SearchReport {
            query: query.to_string(),
            requirement,
            candidates_considered: 0,
            matches: Vec::new(),
        };
        if top_k == 0 {
            return Ok(report);
        }

        if !self.index.is_built() {
            debug!("index not built yet, building before first search");
            self.rebuild_index()?;
        }

        let query_vector = self.embedder.embed_one(query)?;
        let hits = self
            .index
            .search(&query_vector, top_k.saturating_mul(self.oversample));
        report.candidates_considered = hits.len();
        if hits.is_empty() {
            return Ok(report);
        }

        let similarities: HashMap<RecordId, f32> = hits.iter().copied().collect();
        let ids: Vec<RecordId> = hits.iter().map(|(id, _)| *id).collect();
        let candidates: Vec<Candidate> = self
            .store
            .get_records_by_id(&ids)?
            .into_iter()
            .map(|record| {
                let similarity = similarities.get(&record.id).copied();
                Candidate { record, similarity }
            })
            .collect();

        let ranked = self.reranker.rank(&report.requirement, &candidates, top_k);
        let mut records: HashMap<RecordId, Record> = candidates
            .into_iter()
            .map(|c| (c.record.id, c.record))
            .collect();
        report.matches = ranked
            .into_iter()
            .filter_map(|result| {
                records
                    .remove(&result.id)
                    .map(|record| RankedMatch { record, result })
            })
            .collect();

        debug!(
            query,
            skills = report.requirement.must_have.len(),
            min_years = report.requirement.min_years,
            considered = report.candidates_considered,
            returned = report.matches.len(),
            "search complete"
        );
        Ok(report)
    }
}
