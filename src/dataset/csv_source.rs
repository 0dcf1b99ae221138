// CSV source — reads MovieLens-style movies.csv and ratings.csv.
//
// Columns are matched by header name, so extra columns (the ratings
// timestamp) are ignored. A malformed row fails the whole load with the
// file and record position attached.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use super::models::{MovieRecord, RatingEvent};
use super::traits::RatingSource;

/// The default data source: two CSV files on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub movies_path: PathBuf,
    pub ratings_path: PathBuf,
}

impl CsvSource {
    pub fn new(movies_path: impl Into<PathBuf>, ratings_path: impl Into<PathBuf>) -> Self {
        Self {
            movies_path: movies_path.into(),
            ratings_path: ratings_path.into(),
        }
    }
}

impl RatingSource for CsvSource {
    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.movies_path.display(),
            self.ratings_path.display()
        )
    }

    fn movies(&self) -> Result<Vec<MovieRecord>> {
        read_rows(&self.movies_path)
    }

    fn ratings(&self) -> Result<Vec<RatingEvent>> {
        read_rows(&self.ratings_path)
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let row: T = result
            .with_context(|| format!("Failed to parse row {} of {}", i + 2, path.display()))?;
        rows.push(row);
    }

    info!(path = %path.display(), rows = rows.len(), "Read CSV file");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_movies_and_ratings() -> Result<()> {
        let mut movies = NamedTempFile::new()?;
        writeln!(movies, "movieId,title,genres")?;
        writeln!(movies, "1,Toy Story (1995),Adventure|Animation")?;
        writeln!(movies, "2,\"American President, The (1995)\",Comedy|Drama|Romance")?;

        let mut ratings = NamedTempFile::new()?;
        writeln!(ratings, "userId,movieId,rating,timestamp")?;
        writeln!(ratings, "1,1,4.0,964982703")?;
        writeln!(ratings, "1,2,3.5,964981247")?;

        let source = CsvSource::new(movies.path(), ratings.path());
        let movies = source.movies()?;
        let ratings = source.ratings()?;

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, "American President, The (1995)");
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].rating, 3.5);
        Ok(())
    }

    #[test]
    fn test_bad_row_is_an_error() -> Result<()> {
        let mut ratings = NamedTempFile::new()?;
        writeln!(ratings, "userId,movieId,rating")?;
        writeln!(ratings, "1,abc,4.0")?;

        let source = CsvSource::new("unused.csv", ratings.path());
        let err = source.ratings().unwrap_err();
        assert!(format!("{err:#}").contains("row 2"));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = CsvSource::new("/nonexistent/movies.csv", "/nonexistent/ratings.csv");
        assert!(source.movies().is_err());
    }
}
