//! Similarity engine: prototype synthesis and exact ranking.
//!
//! The engine is a pure function of (index snapshot, metric, inputs) at call
//! time. It holds a handle to the shared index and the metric chosen at
//! construction, nothing else.
//!
//! # Algorithm
//! 1. Fuse one or more query vectors into a prototype by elementwise mean
//! 2. Score every index entry against the prototype under the metric
//! 3. Sort by the metric's rank order, breaking ties by insertion position

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::vector::math::{elementwise_mean, validate_finite};
use crate::vector::{
    EmbeddingGenerator, Score, SharedVectorIndex, SimilarityMetric, VectorDimension, VectorError,
};

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Identifier of the index entry.
    pub id: String,
    /// Raw metric output: similarity for cosine, distance for euclidean.
    pub score: Score,
    /// Insertion position of the entry in the index.
    #[serde(skip)]
    pub position: usize,
}

/// Brute-force similarity search over a [`SharedVectorIndex`].
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    index: SharedVectorIndex,
    metric: SimilarityMetric,
    /// Dimension expected from queries before the index has one.
    expected_dimension: Option<VectorDimension>,
}

impl SimilarityEngine {
    /// Creates an engine over `index` using `metric` for its whole lifetime.
    #[must_use]
    pub fn new(index: SharedVectorIndex, metric: SimilarityMetric) -> Self {
        Self {
            index,
            metric,
            expected_dimension: None,
        }
    }

    /// Sets the dimension queries must have while the index is still empty,
    /// usually the embedding provider's output dimension.
    #[must_use]
    pub fn with_expected_dimension(mut self, dimension: VectorDimension) -> Self {
        self.expected_dimension = Some(dimension);
        self
    }

    #[must_use]
    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    #[must_use]
    pub fn index(&self) -> &SharedVectorIndex {
        &self.index
    }

    /// Fuses query vectors into a single prototype by elementwise mean.
    ///
    /// The result depends only on the multiset of inputs, not their order.
    /// The required dimension is the index's once it has one, otherwise the
    /// configured expected dimension, otherwise that of the first query.
    ///
    /// # Errors
    /// - `EmptyQuery` if `queries` is empty
    /// - `DimensionMismatch` if any query has the wrong length
    /// - `InvalidVector` if any query has a non-finite component
    pub fn build_prototype<V: AsRef<[f32]>>(&self, queries: &[V]) -> Result<Vec<f32>, VectorError> {
        let first = queries.first().ok_or(VectorError::EmptyQuery)?;

        let dimension = match self.index.dimension().or(self.expected_dimension) {
            Some(dimension) => dimension,
            None => VectorDimension::new(first.as_ref().len())?,
        };

        let slices: Vec<&[f32]> = queries.iter().map(AsRef::<[f32]>::as_ref).collect();
        for query in &slices {
            dimension.validate_vector(query)?;
            validate_finite(query)?;
        }

        debug!(
            queries = slices.len(),
            dimension = dimension.get(),
            "built query prototype"
        );
        Ok(elementwise_mean(&slices, dimension.get()))
    }

    /// Ranks every index entry against `prototype`.
    ///
    /// Returns exactly one hit per entry, duplicates included, ordered
    /// best-first for the engine's metric. Equal scores keep insertion
    /// order. An empty index yields an empty result.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the prototype length differs from the index
    /// - `InvalidVector` if the prototype has a non-finite component
    /// - `DegenerateVector` for cosine when the prototype or an entry has
    ///   zero norm
    pub fn query(&self, prototype: &[f32]) -> Result<Vec<SearchHit>, VectorError> {
        let start = Instant::now();
        let index = self.index.read();

        let Some(dimension) = index.dimension() else {
            return Ok(Vec::new());
        };
        dimension.validate_vector(prototype)?;
        validate_finite(prototype)?;

        let mut hits = index
            .entries()
            .enumerate()
            .map(|(position, entry)| -> Result<SearchHit, VectorError> {
                Ok(SearchHit {
                    id: entry.id().to_string(),
                    score: self.metric.score(entry.vector(), prototype)?,
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        drop(index);

        let order = self.metric.rank_order();
        hits.sort_by(|a, b| {
            order
                .compare(a.score, b.score)
                .then_with(|| a.position.cmp(&b.position))
        });

        debug!(
            metric = %self.metric,
            results = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "ranked index against prototype"
        );
        Ok(hits)
    }

    /// Like [`query`](Self::query) but keeps only the best `k` hits.
    pub fn query_top_k(&self, prototype: &[f32], k: usize) -> Result<Vec<SearchHit>, VectorError> {
        let mut hits = self.query(prototype)?;
        hits.truncate(k);
        Ok(hits)
    }

    /// Builds a prototype from `queries` and ranks the index against it.
    ///
    /// `top_k = None` returns the full ranking.
    pub fn search<V: AsRef<[f32]>>(
        &self,
        queries: &[V],
        top_k: Option<usize>,
    ) -> Result<Vec<SearchHit>, VectorError> {
        let prototype = self.build_prototype(queries)?;
        match top_k {
            Some(k) => self.query_top_k(&prototype, k),
            None => self.query(&prototype),
        }
    }

    /// Embeds text queries with `generator`, then runs [`search`](Self::search).
    pub fn search_texts(
        &self,
        queries: &[&str],
        generator: &dyn EmbeddingGenerator,
        top_k: Option<usize>,
    ) -> Result<Vec<SearchHit>, VectorError> {
        if queries.is_empty() {
            return Err(VectorError::EmptyQuery);
        }
        let embeddings = generator.generate_embeddings(queries)?;
        self.search(&embeddings, top_k)
    }

    /// Embeds `texts` with `generator` and appends them to the index as one
    /// atomic batch. Returns the number of entries added.
    ///
    /// # Errors
    /// - `BatchLengthMismatch` if the generator returns the wrong number of
    ///   embeddings, or `ids` and `texts` differ in length
    /// - `PartialBatchFailure` if any embedding fails validation
    pub fn index_texts<S: AsRef<str>>(
        &self,
        ids: &[S],
        texts: &[&str],
        generator: &dyn EmbeddingGenerator,
    ) -> Result<usize, VectorError> {
        if ids.len() != texts.len() {
            return Err(VectorError::BatchLengthMismatch {
                identifiers: ids.len(),
                vectors: texts.len(),
            });
        }

        let start = Instant::now();
        let embeddings = generator.generate_embeddings(texts)?;
        let added = embeddings.len();

        self.index
            .append_batch(ids.iter().map(|id| id.as_ref().to_string()), embeddings)?;

        debug!(
            added,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "indexed texts"
        );
        Ok(added)
    }
}
