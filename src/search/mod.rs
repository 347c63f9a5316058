//! Semantic resume search
//!
//! Embeds resumes into an in-memory vector index, retrieves an oversampled
//! candidate set for a query and reranks it against the skills and
//! experience the query asks for.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Recruiter Query                         │
//! └────────────────────────────────────────────────────────────────┘
//!                     │                          │
//!                     ▼                          ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │       Embedder               │  │       QueryInterpreter       │
//! │   (hash embeddings)          │  │   (skills + min years)       │
//! └──────────────────────────────┘  └──────────────────────────────┘
//!                     │                          │
//!                     ▼                          │
//! ┌──────────────────────────────┐               │
//! │       VectorIndex            │               │
//! │   (top k * oversample)       │               │
//! └──────────────────────────────┘               │
//!                     │                          │
//!                     └──────────┬───────────────┘
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │   Reranker (rerank.rs)        │
//!                └───────────────────────────────┘
//!                                │
//!                                ▼
//!                       Top k match results
//! ```

pub mod embeddings;
pub mod query;
pub mod rerank;
pub mod service;
pub mod vector_index;

// Re-export main types
pub use embeddings::{Embedder, HashEmbedder, build_embedder};
pub use query::QueryInterpreter;
pub use rerank::{Candidate, Reranker};
pub use service::{IndexStats, RankedMatch, SearchReport, SearchService};
pub use vector_index::VectorIndex;
