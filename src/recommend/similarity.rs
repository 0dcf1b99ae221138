// Vector similarity — Pearson correlation and cosine similarity.
//
// Pearson works on missing-aware vectors and only uses positions where both
// sides have a value. Cosine works on zero-filled vectors: an unrated cell
// contributes nothing to the dot product.

use ndarray::{Array1, ArrayView1};

/// Pearson correlation over pairwise-complete observations.
///
/// Returns None when fewer than two positions are observed on both sides, or
/// when either side is constant over those positions. The result is clamped
/// to [-1, 1] to absorb rounding.
pub fn pearson_pairwise(a: ArrayView1<Option<f64>>, b: ArrayView1<Option<f64>>) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();

    if xs.len() < 2 {
        return None;
    }

    let xs = Array1::from(xs);
    let ys = Array1::from(ys);
    let dx = &xs - xs.mean()?;
    let dy = &ys - ys.mean()?;

    let var_x = dx.dot(&dx);
    let var_y = dy.dot(&dy);
    if is_constant(&xs, var_x) || is_constant(&ys, var_y) {
        return None;
    }

    Some((dx.dot(&dy) / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// True when `values` carry no variation beyond rounding in their mean.
///
/// `sum_sq_dev` is the sum of squared deviations from the mean. Averaged
/// cells like 10/3 leave a residue of a few ulps, so an exact zero test is
/// not enough.
fn is_constant(values: &Array1<f64>, sum_sq_dev: f64) -> bool {
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return true;
    }
    let n = values.len() as f64;
    let scale = values.mapv(|v| v * v).sum();
    sum_sq_dev <= n * f64::EPSILON * scale
}

/// Cosine similarity of two equal-length vectors.
///
/// A zero vector has similarity 0.0 with everything.
pub fn cosine(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        a.dot(&b) / (norm_a * norm_b)
    }
}
