// Data models — the rows that flow from the data source into the engine.
//
// MovieRecord and RatingEvent mirror the two input relations column for
// column, so the CSV source can deserialize straight into them. Movie is a
// MovieRecord after title normalization.

use serde::{Deserialize, Serialize};

use super::title::{self, ParsedTitle};

/// A raw movie row: id, "Title (Year)" string, pipe-delimited genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "movieId")]
    pub id: u32,
    pub title: String,
    pub genres: String,
}

/// A single rating event. Extra source columns (e.g. timestamp) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingEvent {
    #[serde(rename = "userId")]
    pub user_id: u32,
    #[serde(rename = "movieId")]
    pub movie_id: u32,
    pub rating: f64,
}

/// A catalog movie with its title normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub raw_title: String,
    pub display_title: String,
    /// Canonical lookup key. Not unique: remakes can share one.
    pub clean_title: String,
    pub year: Option<String>,
    pub genres: Vec<String>,
}

impl Movie {
    /// Build a Movie from a raw record and an already-parsed title.
    pub fn from_parts(record: MovieRecord, parsed: ParsedTitle) -> Self {
        Self {
            id: record.id,
            genres: title::split_genres(&record.genres),
            raw_title: record.title,
            display_title: parsed.display_title,
            clean_title: parsed.clean_title,
            year: parsed.year,
        }
    }
}

/// One joined row: a rating event plus the clean title of its movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRating {
    pub user_id: u32,
    pub movie_id: u32,
    pub clean_title: String,
    pub rating: f64,
    /// Rows in the whole relation sharing this clean title. Materialized once
    /// at load time.
    pub rating_count: u32,
}
