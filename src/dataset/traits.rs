// Rating source trait — swap-ready abstraction over the tabular input.
//
// The engine only needs two relations: movie metadata and rating events.
// CSV files are the default provider; tests and embedders can hand over
// in-memory rows instead.

use anyhow::Result;

use super::models::{MovieRecord, RatingEvent};

/// Provider of the two input relations.
pub trait RatingSource {
    /// Short human-readable description, used in logs.
    fn describe(&self) -> String;

    /// All movie metadata rows.
    fn movies(&self) -> Result<Vec<MovieRecord>>;

    /// All rating events.
    fn ratings(&self) -> Result<Vec<RatingEvent>>;
}

/// Source backed by vectors already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub movies: Vec<MovieRecord>,
    pub ratings: Vec<RatingEvent>,
}

impl InMemorySource {
    pub fn new(movies: Vec<MovieRecord>, ratings: Vec<RatingEvent>) -> Self {
        Self { movies, ratings }
    }
}

impl RatingSource for InMemorySource {
    fn describe(&self) -> String {
        format!(
            "in-memory ({} movies, {} ratings)",
            self.movies.len(),
            self.ratings.len()
        )
    }

    fn movies(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.movies.clone())
    }

    fn ratings(&self) -> Result<Vec<RatingEvent>> {
        Ok(self.ratings.clone())
    }
}
