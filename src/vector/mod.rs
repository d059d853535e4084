//! Vector index and similarity ranking.
//!
//! This module holds embeddings for a small collection of items and ranks
//! them against a prototype fused from one or more query embeddings.
//!
//! # Architecture
//! Search is exact and brute force: every query scores every entry. The
//! index is append-only and insertion-ordered; the engine is stateless
//! apart from the index handle and the metric chosen at construction.
//!
//! ```text
//! EmbeddingGenerator ──► VectorIndex::append_batch
//!                              │
//! queries ──► SimilarityEngine::build_prototype ──► SimilarityEngine::query
//! ```

mod embedding;
mod engine;
mod index;
pub mod math;
mod metric;
mod types;

// Re-export core types for public API
#[cfg(feature = "fastembed")]
pub use embedding::FastEmbedGenerator;
pub use embedding::{DEFAULT_HASHING_DIMENSION, EmbeddingGenerator, HashingEmbedder};
pub use engine::{SearchHit, SimilarityEngine};
pub use index::{IndexEntry, SharedVectorIndex, VectorIndex};
pub use metric::{RankOrder, SimilarityMetric};
pub use types::{Score, VectorDimension, VectorError};
