// Item similarity — movies whose ratings move with a reference movie.
//
// The reference title's column in the sparse matrix is correlated with every
// other column using only users who rated both. Titles with too few ratings
// overall are filtered out; the rest are ranked by correlation, with rating
// count breaking ties.

use tracing::debug;

use crate::dataset::loader::FlatRatings;
use crate::dataset::title;
use crate::matrix::RatingMatrix;

use super::enrich::enrich;
use super::similarity::pearson_pairwise;
use super::{
    sort_by_score_then_support, RankedCandidate, RankedMovie, RecommendError, MIN_SUPPORT,
};

/// Pearson correlation of every column against `reference`, before filtering.
///
/// Columns with an undefined correlation are left out. The reference column
/// itself is included.
pub fn correlations(matrix: &RatingMatrix, reference: usize) -> Vec<(usize, f64)> {
    let sparse = matrix.sparse();
    let reference_ratings = sparse.column(reference);

    (0..matrix.n_titles())
        .filter_map(|col| {
            let ratings = sparse.column(col);
            pearson_pairwise(reference_ratings.view(), ratings.view()).map(|r| (col, r))
        })
        .collect()
}

/// The `n` titles most correlated with `title`.
///
/// `title` is matched case-insensitively against clean titles.
pub fn similar_movies(
    flat: &FlatRatings,
    matrix: &RatingMatrix,
    title: &str,
    n: usize,
) -> Result<Vec<RankedMovie>, RecommendError> {
    let key = title::clean_key(title);
    let reference = matrix
        .title_column(&key)
        .ok_or_else(|| RecommendError::MovieNotFound(title.trim().to_string()))?;

    if n == 0 {
        return Ok(Vec::new());
    }

    let correlated = correlations(matrix, reference);
    let defined = correlated.len();

    let mut candidates: Vec<RankedCandidate> = correlated
        .into_iter()
        .filter(|&(col, _)| col != reference)
        .filter_map(|(col, r)| {
            let clean_title = &matrix.titles()[col];
            let support = flat.rating_count(clean_title).unwrap_or(0);
            (support >= MIN_SUPPORT).then(|| RankedCandidate {
                clean_title: clean_title.clone(),
                score: r,
                support_count: support,
            })
        })
        .collect();

    debug!(
        title = %key,
        defined,
        kept = candidates.len(),
        "Computed item correlations"
    );

    if candidates.is_empty() {
        return Err(RecommendError::InsufficientSupport(format!(
            "no title with at least {MIN_SUPPORT} ratings shares enough raters with {:?}",
            title.trim()
        )));
    }

    sort_by_score_then_support(&mut candidates);
    candidates.truncate(n);
    Ok(enrich(flat, &candidates))
}
