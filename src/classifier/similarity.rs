//! Vector math shared by the centroid builder and the classifier.

/// Cosine similarity: dot product over the product of magnitudes.
///
/// Returns `0.0` when either vector has zero length. Vectors are compared
/// element-wise up to the shorter length; callers check dimensions first.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom > 0.0 { dot / denom } else { 0.0 }
}

/// L2-normalize a vector in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// L2 magnitude.
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Element-wise arithmetic mean. The result is not re-normalized.
///
/// Returns `None` for an empty input; all vectors must share the first
/// vector's length (checked by the caller).
pub fn mean(vectors: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = vectors.first()?;
    let mut sum = vec![0.0f32; first.len()];
    for v in vectors {
        for (acc, &val) in sum.iter_mut().zip(v) {
            *acc += val;
        }
    }
    let count = vectors.len() as f32;
    for x in &mut sum {
        *x /= count;
    }
    Some(sum)
}
