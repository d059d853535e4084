//! Vector arithmetic shared by the index and the similarity engine.
//!
//! Inputs are f32 but every sum is accumulated in f64, so finite vectors
//! with very large or very small components neither overflow nor underflow
//! before the final conversion. Callers check dimensions before reaching
//! this layer; only debug assertions guard it here.

use crate::vector::VectorError;

/// Computes the dot product of two equal-length vectors.
#[inline]
#[must_use]
pub fn dot_product(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

/// Computes the L2 norm (magnitude) of a vector.
#[inline]
#[must_use]
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|x| {
            let x = f64::from(*x);
            x * x
        })
        .sum::<f64>()
        .sqrt()
}

/// Computes the Euclidean (L2) distance between two equal-length vectors.
///
/// Always defined and non-negative. A distance beyond `f32::MAX` saturates
/// there instead of becoming infinite.
#[inline]
#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

    let distance = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt();

    distance.min(f64::from(f32::MAX)) as f32
}

/// Computes cosine similarity between two equal-length vectors.
///
/// Returns `DegenerateVector` when either side has zero norm instead of
/// coercing the undefined result to 0.0 or NaN. The result is clamped to
/// [-1.0, 1.0] to absorb rounding at the extremes.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(VectorError::DegenerateVector);
    }

    // Normalize each side first; norm_a * norm_b can exceed f64 range
    let similarity = dot_product(a, b) / norm_a / norm_b;
    Ok(similarity.clamp(-1.0, 1.0) as f32)
}

/// Rejects vectors containing NaN or infinite components.
pub fn validate_finite(vector: &[f32]) -> Result<(), VectorError> {
    match vector.iter().position(|v| !v.is_finite()) {
        Some(position) => Err(VectorError::InvalidVector {
            position,
            value: vector[position],
        }),
        None => Ok(()),
    }
}

/// Elementwise arithmetic mean of equal-length vectors.
///
/// Sums are accumulated in f64 so the result does not drift with the order
/// of the inputs.
pub(crate) fn elementwise_mean(vectors: &[&[f32]], dimension: usize) -> Vec<f32> {
    let mut sums = vec![0.0f64; dimension];
    for vector in vectors {
        for (sum, value) in sums.iter_mut().zip(vector.iter()) {
            *sum += f64::from(*value);
        }
    }

    let count = vectors.len() as f64;
    sums.into_iter().map(|sum| (sum / count) as f32).collect()
}
