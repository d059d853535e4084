//! Append-only, insertion-ordered vector index.
//!
//! The index pairs each identifier with its embedding in a single entry, so
//! the identifier list and the vector list can never drift apart. Insertion
//! order is the canonical order used to break ranking ties.
//!
//! # Dimension
//! The index starts without a dimension. The first vector appended fixes it
//! and every later vector must match. There is no truthiness check on the
//! vectors themselves: "not yet initialized" is simply `dimension() == None`.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::debug;

use crate::vector::math::validate_finite;
use crate::vector::{VectorDimension, VectorError};

/// One indexed item: an opaque identifier and its embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    id: String,
    vector: Vec<f32>,
}

impl IndexEntry {
    /// The identifier supplied at append time (e.g. a file path).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The embedding, immutable once indexed.
    #[must_use]
    pub fn vector(&self) -> &[f32] {
        &self.vector
    }
}

/// Ordered collection of embedded items.
///
/// Duplicate identifiers are allowed; each occurrence is an independent
/// entry that is scored and returned on its own.
#[derive(Debug, Default, Clone)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimension: Option<VectorDimension>,
}

impl VectorIndex {
    /// Creates an empty index with no dimension yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry at the end of the index.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the index already has a dimension and the
    ///   vector's length differs from it
    /// - `InvalidDimension` if this is the first vector and it is empty
    /// - `InvalidVector` if any component is NaN or infinite
    ///
    /// On error the index is unchanged.
    pub fn append(&mut self, id: impl Into<String>, vector: Vec<f32>) -> Result<(), VectorError> {
        let dimension = Self::validate(self.dimension, &vector)?;

        self.dimension = Some(dimension);
        self.entries.push(IndexEntry {
            id: id.into(),
            vector,
        });

        debug!(
            added = 1,
            total = self.entries.len(),
            dimension = dimension.get(),
            "appended entry to vector index"
        );
        Ok(())
    }

    /// Appends many entries atomically.
    ///
    /// Every item is validated before anything is stored: either the whole
    /// batch lands in order, or the index is left exactly as it was. When
    /// the index is empty, the first item of the batch fixes the dimension
    /// for the rest of the batch.
    ///
    /// # Errors
    /// - `BatchLengthMismatch` if the two sequences differ in length
    /// - `PartialBatchFailure` wrapping the first item's validation error
    pub fn append_batch<I, S, V>(&mut self, identifiers: I, vectors: V) -> Result<(), VectorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = Vec<f32>>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        let vectors: Vec<Vec<f32>> = vectors.into_iter().collect();

        if identifiers.len() != vectors.len() {
            return Err(VectorError::BatchLengthMismatch {
                identifiers: identifiers.len(),
                vectors: vectors.len(),
            });
        }

        if vectors.is_empty() {
            return Ok(());
        }

        let mut dimension = self.dimension;
        for (position, vector) in vectors.iter().enumerate() {
            let checked =
                Self::validate(dimension, vector).map_err(|e| e.in_batch(position))?;
            dimension = Some(checked);
        }

        let added = vectors.len();
        self.dimension = dimension;
        self.entries.extend(
            identifiers
                .into_iter()
                .zip(vectors)
                .map(|(id, vector)| IndexEntry { id, vector }),
        );

        debug!(
            added,
            total = self.entries.len(),
            dimension = ?self.dimension.map(|d| d.get()),
            "appended batch to vector index"
        );
        Ok(())
    }

    /// Current entry count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The dimension fixed by the first entry, or `None` while empty.
    #[must_use]
    pub fn dimension(&self) -> Option<VectorDimension> {
        self.dimension
    }

    /// Iterates entries in insertion order.
    ///
    /// Each call starts a fresh pass from the beginning.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &IndexEntry> + '_ {
        self.entries.iter()
    }

    /// Entry at an insertion position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }

    fn validate(
        dimension: Option<VectorDimension>,
        vector: &[f32],
    ) -> Result<VectorDimension, VectorError> {
        let dimension = match dimension {
            Some(dimension) => {
                dimension.validate_vector(vector)?;
                dimension
            }
            None => VectorDimension::new(vector.len())?,
        };
        validate_finite(vector)?;
        Ok(dimension)
    }
}

/// Thread-safe handle to a [`VectorIndex`].
///
/// Single writer, many readers: appends take the write lock, queries and
/// iteration take the read lock. A batch append is applied under one write
/// lock, so readers never observe half of it.
#[derive(Clone, Default)]
pub struct SharedVectorIndex {
    inner: Arc<RwLock<VectorIndex>>,
}

impl SharedVectorIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`VectorIndex::append`].
    pub fn append(&self, id: impl Into<String>, vector: Vec<f32>) -> Result<(), VectorError> {
        self.inner.write().append(id, vector)
    }

    /// See [`VectorIndex::append_batch`].
    pub fn append_batch<I, S, V>(&self, identifiers: I, vectors: V) -> Result<(), VectorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = Vec<f32>>,
    {
        self.inner.write().append_batch(identifiers, vectors)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    #[must_use]
    pub fn dimension(&self) -> Option<VectorDimension> {
        self.inner.read().dimension()
    }

    /// Shared access for reading entries. Appends block while the guard lives.
    pub fn read(&self) -> RwLockReadGuard<'_, VectorIndex> {
        self.inner.read()
    }
}

impl std::fmt::Debug for SharedVectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let index = self.inner.read();
        f.debug_struct("SharedVectorIndex")
            .field("size", &index.size())
            .field("dimension", &index.dimension())
            .finish()
    }
}
