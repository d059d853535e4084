//! Type-safe wrappers and the error type for the vector index.
//!
//! Dimensions and scores are newtypes so that a bare `usize` or `f32`
//! never travels through the ranking code unchecked.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Type-safe wrapper for vector dimensions.
///
/// A dimension is always non-zero. The index learns its dimension from the
/// first vector appended; the engine may also be configured with one up
/// front (usually taken from the embedding provider).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorDimension(usize);

impl VectorDimension {
    /// Creates a new `VectorDimension` with validation.
    ///
    /// Returns an error if the dimension is zero.
    pub fn new(dim: usize) -> Result<Self, VectorError> {
        if dim == 0 {
            return Err(VectorError::InvalidDimension {
                dimension: 0,
                reason: "Vector dimension cannot be zero",
            });
        }
        Ok(Self(dim))
    }

    /// Creates a dimension from a known non-zero constant.
    pub(crate) const fn from_const(dim: usize) -> Self {
        assert!(dim > 0, "Vector dimension cannot be zero");
        Self(dim)
    }

    /// Returns the underlying dimension value.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Validates that a vector has the expected dimension.
    pub fn validate_vector(&self, vector: &[f32]) -> Result<(), VectorError> {
        if vector.len() != self.0 {
            return Err(VectorError::DimensionMismatch {
                expected: self.0,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for VectorDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite similarity score or distance.
///
/// What "better" means depends on the metric that produced it; see
/// [`RankOrder`](crate::vector::RankOrder). A `Score` is never NaN or
/// infinite, which gives it a total order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Score(f32);

impl Score {
    /// Creates a new `Score`, rejecting non-finite values.
    pub fn new(value: f32) -> Result<Self, VectorError> {
        if !value.is_finite() {
            return Err(VectorError::InvalidScore {
                value,
                reason: "Score must be a finite number",
            });
        }
        Ok(Self(value))
    }

    /// Returns the underlying f32 value.
    #[must_use]
    pub fn get(&self) -> f32 {
        self.0
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Errors that can occur during vector operations.
///
/// All of these are validation failures detected before the index is
/// touched. Messages include a suggestion for resolution.
#[derive(Error, Debug)]
pub enum VectorError {
    #[error(
        "Vector dimension mismatch: expected {expected}, got {actual}\nSuggestion: Ensure all vectors use the same embedding model"
    )]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid vector dimension: {dimension}\nReason: {reason}")]
    InvalidDimension {
        dimension: usize,
        reason: &'static str,
    },

    #[error(
        "Invalid vector: non-finite value {value} at position {position}\nSuggestion: Check the embedding provider output for NaN or infinite components"
    )]
    InvalidVector { position: usize, value: f32 },

    #[error("Invalid score value: {value}\nReason: {reason}")]
    InvalidScore { value: f32, reason: &'static str },

    #[error("Empty query: at least one query vector is required to build a prototype")]
    EmptyQuery,

    #[error(
        "Degenerate vector: cosine similarity is undefined for a zero-norm vector\nSuggestion: Use the euclidean metric or a query with content the embedder recognizes"
    )]
    DegenerateVector,

    #[error("Batch rejected: item {position} failed validation: {source}")]
    PartialBatchFailure {
        position: usize,
        #[source]
        source: Box<VectorError>,
    },

    #[error(
        "Batch rejected: {identifiers} identifiers but {vectors} vectors\nSuggestion: Pass exactly one vector per identifier"
    )]
    BatchLengthMismatch { identifiers: usize, vectors: usize },

    #[error(
        "Embedding generation failed: {0}\nSuggestion: Verify the embedding model is properly initialized"
    )]
    EmbeddingFailed(String),

    #[error("I/O error: {0}\nSuggestion: Check that the file exists and is readable")]
    Io(#[from] std::io::Error),
}

impl VectorError {
    /// Wraps a per-item validation failure as a batch rejection.
    pub(crate) fn in_batch(self, position: usize) -> Self {
        Self::PartialBatchFailure {
            position,
            source: Box::new(self),
        }
    }
}
