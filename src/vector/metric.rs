//! Similarity metrics and their ranking direction.
//!
//! A metric is chosen once when the engine is built. Each variant knows how
//! to score a pair of vectors and which way its scores rank, so the ranking
//! and tie-break code in the engine never branches on the metric itself.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::vector::math::{cosine_similarity, euclidean_distance};
use crate::vector::{Score, VectorError};

/// Which direction of a score counts as "more relevant".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Similarities: larger scores rank first.
    HigherIsBetter,
    /// Distances: smaller scores rank first.
    LowerIsBetter,
}

impl RankOrder {
    /// Orders two scores so that the more relevant one compares `Less`.
    #[must_use]
    pub fn compare(&self, a: Score, b: Score) -> Ordering {
        match self {
            Self::HigherIsBetter => b.cmp(&a),
            Self::LowerIsBetter => a.cmp(&b),
        }
    }
}

/// The closed set of supported similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// `dot(a, b) / (|a| * |b|)`, bounded in [-1, 1].
    #[default]
    Cosine,
    /// L2 distance, non-negative.
    #[serde(alias = "l2")]
    Euclidean,
}

impl SimilarityMetric {
    /// Scores `candidate` against `query`.
    ///
    /// # Errors
    /// `DegenerateVector` for cosine against a zero-norm vector.
    pub fn score(&self, candidate: &[f32], query: &[f32]) -> Result<Score, VectorError> {
        let raw = match self {
            Self::Cosine => cosine_similarity(candidate, query)?,
            Self::Euclidean => euclidean_distance(candidate, query),
        };
        Score::new(raw)
    }

    /// Ranking direction of the scores this metric produces.
    #[must_use]
    pub fn rank_order(&self) -> RankOrder {
        match self {
            Self::Cosine => RankOrder::HigherIsBetter,
            Self::Euclidean => RankOrder::LowerIsBetter,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclidean" | "l2" => Ok(Self::Euclidean),
            other => Err(format!(
                "Unknown similarity metric '{other}'. Expected 'cosine' or 'euclidean'"
            )),
        }
    }
}
