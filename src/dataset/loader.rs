// Dataset loader — joins movies with ratings into the flat relation.
//
// This is a pure inner join on movie id: ratings for unknown movies and
// movies nobody rated are both dropped from the flat rows (the unrated movies
// stay in the catalog for random picks). After the join, every row gets the
// number of rows sharing its clean title.
//
// Two movie ids can normalize to the same clean title (remakes, re-releases).
// Their ratings are merged under that one title. The id mapping is kept so
// callers can see which movies a title stands for.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use super::models::{FlatRating, Movie, MovieRecord, RatingEvent};
use super::title;
use super::traits::RatingSource;

/// Counters collected while loading, shown by `cinematch status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Movie rows read from the source
    pub movies: usize,
    /// Rating rows read from the source
    pub ratings: usize,
    /// Rows in the joined relation
    pub joined: usize,
    /// Ratings dropped because their movie id is not in the catalog
    pub dropped_ratings: usize,
    /// Ratings dropped because the value is not a finite number
    pub invalid_ratings: usize,
    /// Catalog movies with no ratings at all
    pub unrated_movies: usize,
    /// Movie rows sharing an id with an earlier row (later rows ignored)
    pub duplicate_movie_ids: usize,
    /// Titles that needed a best-effort parse
    pub title_anomalies: usize,
    /// Distinct clean titles in the joined relation
    pub distinct_titles: usize,
    /// Clean titles backed by more than one movie id
    pub merged_titles: usize,
}

/// The joined, immutable flat relation plus the lookups built alongside it.
#[derive(Debug, Clone)]
pub struct FlatRatings {
    rows: Vec<FlatRating>,
    catalog: Vec<Movie>,
    rating_counts: HashMap<String, u32>,
    title_ids: BTreeMap<String, Vec<u32>>,
    /// clean title -> catalog index of the movie behind its first joined row
    first_movie: HashMap<String, usize>,
    report: LoadReport,
}

/// Read both relations from a source and join them.
pub fn load(source: &dyn RatingSource) -> Result<FlatRatings> {
    info!(source = %source.describe(), "Loading dataset");
    let movies = source.movies()?;
    let ratings = source.ratings()?;
    Ok(FlatRatings::from_rows(movies, ratings))
}

impl FlatRatings {
    /// Normalize titles, join, and materialize per-title rating counts.
    pub fn from_rows(records: Vec<MovieRecord>, events: Vec<RatingEvent>) -> Self {
        let mut report = LoadReport {
            movies: records.len(),
            ratings: events.len(),
            ..LoadReport::default()
        };

        let mut catalog: Vec<Movie> = Vec::with_capacity(records.len());
        let mut by_id: HashMap<u32, usize> = HashMap::with_capacity(records.len());

        for record in records {
            if by_id.contains_key(&record.id) {
                warn!(movie_id = record.id, "Duplicate movie id, keeping first row");
                report.duplicate_movie_ids += 1;
                continue;
            }

            let (parsed, anomaly) = title::parse_title_lenient(&record.title);
            if let Some(anomaly) = anomaly {
                warn!(movie_id = record.id, error = %anomaly, "Using partial title parse");
                report.title_anomalies += 1;
            }

            by_id.insert(record.id, catalog.len());
            catalog.push(Movie::from_parts(record, parsed));
        }

        let mut rows = Vec::with_capacity(events.len());
        let mut movie_of_row = Vec::with_capacity(events.len());

        for event in events {
            if !event.rating.is_finite() {
                report.invalid_ratings += 1;
                continue;
            }
            let Some(&idx) = by_id.get(&event.movie_id) else {
                report.dropped_ratings += 1;
                continue;
            };
            rows.push(FlatRating {
                user_id: event.user_id,
                movie_id: event.movie_id,
                clean_title: catalog[idx].clean_title.clone(),
                rating: event.rating,
                rating_count: 0,
            });
            movie_of_row.push(idx);
        }

        let mut rating_counts: HashMap<String, u32> = HashMap::new();
        for row in &rows {
            *rating_counts.entry(row.clean_title.clone()).or_insert(0) += 1;
        }
        for row in &mut rows {
            row.rating_count = rating_counts[&row.clean_title];
        }

        let mut first_movie: HashMap<String, usize> = HashMap::new();
        let mut title_ids: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        let mut rated: HashSet<usize> = HashSet::new();
        for (row, &idx) in rows.iter().zip(&movie_of_row) {
            first_movie.entry(row.clean_title.clone()).or_insert(idx);
            if rated.insert(idx) {
                title_ids
                    .entry(row.clean_title.clone())
                    .or_default()
                    .push(row.movie_id);
            }
        }
        for ids in title_ids.values_mut() {
            ids.sort_unstable();
        }

        report.joined = rows.len();
        report.unrated_movies = catalog.len() - rated.len();
        report.distinct_titles = rating_counts.len();
        report.merged_titles = title_ids.values().filter(|ids| ids.len() > 1).count();

        if report.dropped_ratings > 0 {
            warn!(
                dropped = report.dropped_ratings,
                "Ratings reference movie ids missing from the catalog"
            );
        }
        if report.invalid_ratings > 0 {
            warn!(invalid = report.invalid_ratings, "Dropped non-finite ratings");
        }
        if report.merged_titles > 0 {
            info!(
                merged = report.merged_titles,
                "Clean titles shared by several movie ids; their ratings are aggregated"
            );
        }
        info!(
            rows = report.joined,
            titles = report.distinct_titles,
            catalog = catalog.len(),
            "Joined movies with ratings"
        );

        Self {
            rows,
            catalog,
            rating_counts,
            title_ids,
            first_movie,
            report,
        }
    }

    pub fn rows(&self) -> &[FlatRating] {
        &self.rows
    }

    /// Every parsed movie, including ones with no ratings.
    pub fn catalog(&self) -> &[Movie] {
        &self.catalog
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materialized rating count for a clean title (None if never rated).
    pub fn rating_count(&self, clean_title: &str) -> Option<u32> {
        self.rating_counts.get(clean_title).copied()
    }

    /// Movie ids merged under a clean title, ascending.
    pub fn movie_ids(&self, clean_title: &str) -> &[u32] {
        self.title_ids
            .get(clean_title)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Metadata for a clean title: the movie behind its first joined row.
    pub fn metadata(&self, clean_title: &str) -> Option<&Movie> {
        self.first_movie.get(clean_title).map(|&idx| &self.catalog[idx])
    }
}
