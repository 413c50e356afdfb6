use crate::SemanticError;

/// In-place L2 normalization helper to keep allocations down during hot paths.
/// A zero vector stays zero.
pub fn l2_normalize_in_place(v: &mut [f32]) {
    let norm_sq: f32 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

/// Cosine of the angle between `a` and `b`, in `[-1, 1]`.
///
/// Accumulates in f64 so `cos(a, b) == cos(b, a)` exactly. A zero-norm side
/// gives 0.0 rather than NaN; vectors of different length are an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SemanticError> {
    if a.len() != b.len() {
        return Err(SemanticError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}
