// Popularity ranking — the most-rated titles first.
//
// Titles are grouped in lexicographic order, then stably sorted by rating
// count. Titles with equal counts therefore stay alphabetical; callers should
// not rely on that beyond it being deterministic.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dataset::loader::FlatRatings;

use super::enrich::enrich;
use super::{RankedCandidate, RankedMovie};

/// Every rated title, scored by mean rating and ordered by rating count.
pub fn popularity_ranking(flat: &FlatRatings) -> Vec<RankedCandidate> {
    // title -> (rating sum, rows, rating_count)
    let mut groups: BTreeMap<&str, (f64, u32, u32)> = BTreeMap::new();
    for row in flat.rows() {
        let entry = groups
            .entry(row.clean_title.as_str())
            .or_insert((0.0, 0, row.rating_count));
        entry.0 += row.rating;
        entry.1 += 1;
    }

    let mut ranked: Vec<RankedCandidate> = groups
        .into_iter()
        .map(|(title, (sum, rows, count))| RankedCandidate {
            clean_title: title.to_string(),
            score: sum / rows as f64,
            support_count: count,
        })
        .collect();

    ranked.sort_by(|a, b| b.support_count.cmp(&a.support_count));
    ranked
}

/// The `n` most-rated titles with their metadata.
///
/// `n == 0` gives an empty list; `n` larger than the number of titles gives
/// all of them.
pub fn top_movies(flat: &FlatRatings, n: usize) -> Vec<RankedMovie> {
    if n == 0 {
        return Vec::new();
    }

    let mut ranked = popularity_ranking(flat);
    debug!(titles = ranked.len(), n, "Ranked titles by popularity");
    ranked.truncate(n);
    enrich(flat, &ranked)
}
