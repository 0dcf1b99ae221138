// Result enrichment — turns ranked clean titles into displayable rows.
//
// Shared by all three recommenders. Looks up genres and year for each title,
// keeps only the first occurrence of a title, and drops the score.

use std::collections::HashSet;

use crate::dataset::loader::FlatRatings;
use crate::dataset::models::Movie;

use super::{RankedCandidate, RankedMovie};

/// Join ranked candidates with their metadata, preserving rank order.
pub fn enrich(flat: &FlatRatings, ranked: &[RankedCandidate]) -> Vec<RankedMovie> {
    let mut seen: HashSet<&str> = HashSet::new();
    ranked
        .iter()
        .filter(|c| seen.insert(c.clean_title.as_str()))
        .filter_map(|c| flat.metadata(&c.clean_title))
        .map(to_ranked_movie)
        .collect()
}

/// Display row for a single catalog movie.
pub fn to_ranked_movie(movie: &Movie) -> RankedMovie {
    RankedMovie {
        title: movie.display_title.clone(),
        genres: movie.genres.clone(),
        year: movie.year.clone(),
    }
}
