//! Prototype-based similarity search over a small in-memory embedding index.
//!
//! Items are embedded by an [`EmbeddingGenerator`](vector::EmbeddingGenerator),
//! appended to a [`VectorIndex`](vector::VectorIndex), and ranked by a
//! [`SimilarityEngine`](vector::SimilarityEngine) against the mean of one or
//! more query embeddings.

pub mod config;
pub mod io;
pub mod vector;

// Explicit exports for better API clarity
pub use config::Settings;
pub use vector::{
    EmbeddingGenerator, HashingEmbedder, IndexEntry, RankOrder, Score, SearchHit,
    SharedVectorIndex, SimilarityEngine, SimilarityMetric, VectorDimension, VectorError,
    VectorIndex,
};
