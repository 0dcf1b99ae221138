use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::dataset::csv_source::CsvSource;

/// Largest list a single query may ask for, unless overridden.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so every
/// setting can live there instead of the shell.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding movies.csv and ratings.csv (CINEMATCH_DATA_DIR)
    pub data_dir: PathBuf,
    /// Movie metadata file (CINEMATCH_MOVIES_PATH, default <data_dir>/movies.csv)
    pub movies_path: PathBuf,
    /// Rating events file (CINEMATCH_RATINGS_PATH, default <data_dir>/ratings.csv)
    pub ratings_path: PathBuf,
    /// Upper bound for --count (CINEMATCH_MAX_RESULTS)
    pub max_results: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only a malformed CINEMATCH_MAX_RESULTS is an error.
    pub fn load() -> Result<Self> {
        let data_dir = env::var("CINEMATCH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let movies_path = env::var("CINEMATCH_MOVIES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("movies.csv"));
        let ratings_path = env::var("CINEMATCH_RATINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("ratings.csv"));

        let max_results = match env::var("CINEMATCH_MAX_RESULTS") {
            Ok(raw) => parse_max_results(&raw)?,
            Err(_) => DEFAULT_MAX_RESULTS,
        };

        Ok(Self {
            data_dir,
            movies_path,
            ratings_path,
            max_results,
        })
    }

    /// Check that both input files exist.
    /// Call this before loading so the user gets a hint instead of an IO error.
    pub fn require_data_files(&self) -> Result<()> {
        for path in [&self.movies_path, &self.ratings_path] {
            if !Path::new(path).exists() {
                anyhow::bail!(
                    "Data file not found: {}\n\
                     Point CINEMATCH_DATA_DIR at a directory with movies.csv and ratings.csv,\n\
                     or set CINEMATCH_MOVIES_PATH / CINEMATCH_RATINGS_PATH directly.",
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// The CSV source for the configured files.
    pub fn source(&self) -> CsvSource {
        CsvSource::new(&self.movies_path, &self.ratings_path)
    }

    /// Clamp a requested list length to the configured maximum.
    pub fn clamp_count(&self, requested: usize) -> usize {
        requested.min(self.max_results)
    }
}

fn parse_max_results(raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("CINEMATCH_MAX_RESULTS must be a positive integer, got {raw:?}"))?;
    if value == 0 {
        anyhow::bail!("CINEMATCH_MAX_RESULTS must be at least 1");
    }
    Ok(value)
}
