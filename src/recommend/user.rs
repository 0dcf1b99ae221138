// User similarity — predict ratings from users with similar taste.
//
// Every other user is weighted by the cosine similarity of their zero-filled
// rating row to the reference user's row, with weights normalized to sum to
// one. For each title the reference user has not rated, the predicted rating
// is the weighted sum of the other users' filled ratings.
//
// "Not rated" comes from the observed mask, not from the cell being 0.0.

use ndarray::{Array1, Axis};
use tracing::debug;

use crate::dataset::loader::FlatRatings;
use crate::matrix::RatingMatrix;

use super::enrich::enrich;
use super::similarity::cosine;
use super::{RankedCandidate, RankedMovie, RecommendError};

/// Normalized neighbor weights for `reference`: (row, weight) for every other
/// user. None when the similarities sum to zero.
pub fn neighbor_weights(matrix: &RatingMatrix, reference: usize) -> Option<Vec<(usize, f64)>> {
    let filled = matrix.filled();
    let reference_row = filled.row(reference);

    let similarities: Vec<(usize, f64)> = (0..matrix.n_users())
        .filter(|&row| row != reference)
        .map(|row| (row, cosine(reference_row, filled.row(row))))
        .collect();

    let total: f64 = similarities.iter().map(|(_, s)| s).sum();
    if total.abs() < f64::EPSILON {
        return None;
    }

    Some(
        similarities
            .into_iter()
            .map(|(row, s)| (row, s / total))
            .collect(),
    )
}

/// Predicted ratings for every title `reference` has not rated, unsorted.
pub fn predicted_ratings(
    matrix: &RatingMatrix,
    reference: usize,
    weights: &[(usize, f64)],
) -> Vec<(usize, f64)> {
    let filled = matrix.filled();
    let unrated: Vec<usize> = filled
        .observed_row(reference)
        .iter()
        .enumerate()
        .filter(|(_, observed)| !**observed)
        .map(|(col, _)| col)
        .collect();

    if unrated.is_empty() {
        return Vec::new();
    }

    let neighbors: Vec<usize> = weights.iter().map(|&(row, _)| row).collect();
    let weight_vec: Array1<f64> = weights.iter().map(|&(_, w)| w).collect();

    // neighbors × unrated, then weight each neighbor's row
    let unrated_ratings = filled
        .values()
        .select(Axis(0), &neighbors)
        .select(Axis(1), &unrated);
    let predicted = unrated_ratings.t().dot(&weight_vec);

    unrated.into_iter().zip(predicted).collect()
}

/// The `n` unrated titles with the highest predicted rating for `user_id`.
pub fn recommended_movies(
    flat: &FlatRatings,
    matrix: &RatingMatrix,
    user_id: u32,
    n: usize,
) -> Result<Vec<RankedMovie>, RecommendError> {
    let reference = matrix
        .user_row(user_id)
        .ok_or(RecommendError::UserNotFound(user_id))?;

    if n == 0 {
        return Ok(Vec::new());
    }

    let weights = neighbor_weights(matrix, reference).ok_or_else(|| {
        RecommendError::InsufficientSupport(format!(
            "user {user_id} has no similarity with any other user"
        ))
    })?;

    let mut candidates: Vec<RankedCandidate> = predicted_ratings(matrix, reference, &weights)
        .into_iter()
        .map(|(col, score)| {
            let clean_title = matrix.titles()[col].clone();
            let support_count = flat.rating_count(&clean_title).unwrap_or(0);
            RankedCandidate {
                clean_title,
                score,
                support_count,
            }
        })
        .collect();

    debug!(user_id, unrated = candidates.len(), "Predicted ratings");

    if candidates.is_empty() {
        return Err(RecommendError::InsufficientSupport(format!(
            "user {user_id} has rated every title"
        )));
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(n);
    Ok(enrich(flat, &candidates))
}
