//! Embedding providers.
//!
//! The similarity engine never embeds anything itself; it only needs
//! something that turns content into fixed-dimension vectors. This module
//! defines that seam and ships two providers:
//!
//! - `FastEmbedGenerator` (feature `fastembed`): a sentence embedding
//!   model via fastembed, for semantic search.
//! - [`HashingEmbedder`]: deterministic feature-hashing bag of words, the
//!   offline fallback. No model download, same output on every machine.
//!   Only keyword overlap counts, which is also what tests rely on.

use crate::vector::{VectorDimension, VectorError};

/// Default output dimension of the hashing embedder.
pub const DEFAULT_HASHING_DIMENSION: usize = 512;

/// Trait for generating embeddings from text.
///
/// Implementations must be thread-safe and return exactly one vector per
/// input text, each of length [`dimension`](Self::dimension).
pub trait EmbeddingGenerator: Send + Sync {
    /// Generate embeddings for multiple texts.
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorError>;

    /// Get the dimension of embeddings produced by this generator.
    #[must_use]
    fn dimension(&self) -> VectorDimension;
}

/// Feature-hashing text embedder.
///
/// Each lowercase alphanumeric token is hashed into one of `dimension`
/// buckets with a hash-derived sign, then the vector is normalized to unit
/// length. Text with no tokens embeds to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: VectorDimension,
}

impl HashingEmbedder {
    #[must_use]
    pub fn new(dimension: VectorDimension) -> Self {
        Self { dimension }
    }

    /// Embeds a single text.
    #[must_use]
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let dim = self.dimension.get();
        let mut embedding = vec![0.0f32; dim];

        for token in tokenize(text) {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % dim as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for val in &mut embedding {
                *val /= magnitude;
            }
        }

        embedding
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimension: VectorDimension::from_const(DEFAULT_HASHING_DIMENSION),
        }
    }
}

impl EmbeddingGenerator for HashingEmbedder {
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorError> {
        Ok(texts.iter().map(|text| self.embed(text)).collect())
    }

    fn dimension(&self) -> VectorDimension {
        self.dimension
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// 64-bit FNV-1a. Stable across platforms and compiler versions.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}

#[cfg(feature = "fastembed")]
pub use self::fast::FastEmbedGenerator;

#[cfg(feature = "fastembed")]
mod fast {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

    use super::EmbeddingGenerator;
    use crate::vector::{VectorDimension, VectorError};

    /// FastEmbed implementation using the AllMiniLML6V2 model (384 dimensions).
    pub struct FastEmbedGenerator {
        model: Mutex<TextEmbedding>,
        dimension: VectorDimension,
    }

    impl FastEmbedGenerator {
        /// Create a new generator, downloading the model into `cache_dir` on
        /// first use.
        ///
        /// # Errors
        /// Returns an error if the model fails to initialize or download.
        pub fn new(cache_dir: PathBuf) -> Result<Self, VectorError> {
            let model = TextEmbedding::try_new(
                InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                    .with_cache_dir(cache_dir)
                    .with_show_download_progress(false),
            )
            .map_err(|e| VectorError::EmbeddingFailed(
                format!("Failed to initialize embedding model: {e}. Ensure you have internet connection for first-time model download")
            ))?;

            Ok(Self {
                model: Mutex::new(model),
                dimension: VectorDimension::from_const(384),
            })
        }
    }

    impl EmbeddingGenerator for FastEmbedGenerator {
        fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, VectorError> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }

            let embeddings = self
                .model
                .lock()
                .map_err(|_| {
                    VectorError::EmbeddingFailed(
                        "Failed to acquire embedding model lock - model may be poisoned"
                            .to_string(),
                    )
                })?
                .embed(texts.to_vec(), None)
                .map_err(|e| {
                    VectorError::EmbeddingFailed(format!("Failed to generate embeddings: {e}"))
                })?;

            for embedding in &embeddings {
                self.dimension.validate_vector(embedding)?;
            }

            Ok(embeddings)
        }

        fn dimension(&self) -> VectorDimension {
            self.dimension
        }
    }
}
