// Recommenders — popularity, similar movies, and similar users.
//
// Each operation is a pure function of the flat relation, the rating matrix
// and the request. Nothing is cached between calls; the similarity scores are
// recomputed every time.
//
// Outcomes are typed: an unknown title or user is NotFound, and a query that
// is valid but leaves no candidate after filtering is InsufficientSupport.
// Callers can render the two differently.

pub mod enrich;
pub mod item;
pub mod popularity;
pub mod similarity;
pub mod user;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Titles with fewer ratings than this never appear as similar movies.
pub const MIN_SUPPORT: u32 = 10;

/// Why a recommendation query produced no list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("movie not found: {0:?}")]
    MovieNotFound(String),
    #[error("user not found: {0}")]
    UserNotFound(u32),
    #[error("no candidates left: {0}")]
    InsufficientSupport(String),
}

impl RecommendError {
    /// Stable machine-readable name, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::MovieNotFound(_) => "movie_not_found",
            RecommendError::UserNotFound(_) => "user_not_found",
            RecommendError::InsufficientSupport(_) => "insufficient_support",
        }
    }
}

/// A scored title, produced per query and discarded after ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub clean_title: String,
    pub score: f64,
    /// Materialized rating count of the title
    pub support_count: u32,
}

/// One line of a finished recommendation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMovie {
    pub title: String,
    pub genres: Vec<String>,
    pub year: Option<String>,
}

impl RankedMovie {
    /// Genres as shown in listings: comma-separated, "-" when there are none.
    pub fn genre_label(&self) -> String {
        if self.genres.is_empty() {
            "-".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}

/// Sort candidates by score, then support, both descending.
///
/// The sort is stable, so equal candidates keep their incoming order.
pub(crate) fn sort_by_score_then_support(candidates: &mut [RankedCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(b.support_count.cmp(&a.support_count))
    });
}
