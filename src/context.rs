// Dataset context — the loaded data every recommendation reads from.
//
// A Dataset is built in one go (load, join, pivot) and is immutable after
// that. SharedDataset holds the current one behind an Arc: readers clone the
// Arc and keep using their snapshot, while a reload builds a complete new
// Dataset first and only then swaps it in. Nobody ever sees a half-built
// matrix.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::info;

use crate::dataset::loader::{self, FlatRatings, LoadReport};
use crate::dataset::traits::RatingSource;
use crate::matrix::RatingMatrix;
use crate::recommend::enrich::to_ranked_movie;
use crate::recommend::{item, popularity, user, RankedMovie, RecommendError};

/// One fully loaded, read-only dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    flat: FlatRatings,
    matrix: RatingMatrix,
    version: u64,
    loaded_at: DateTime<Utc>,
    load_duration: Duration,
}

impl Dataset {
    /// Load, join and pivot everything from `source`.
    pub fn load(source: &dyn RatingSource) -> Result<Self> {
        Self::load_versioned(source, 1)
    }

    fn load_versioned(source: &dyn RatingSource, version: u64) -> Result<Self> {
        let started = Instant::now();
        let flat = loader::load(source)?;
        let mut dataset = Self::from_flat(flat, version);
        dataset.load_duration = started.elapsed();

        info!(
            version,
            users = dataset.matrix.n_users(),
            titles = dataset.matrix.n_titles(),
            elapsed_ms = dataset.load_duration.as_millis() as u64,
            "Dataset ready"
        );
        Ok(dataset)
    }

    /// Build the matrix for an already-joined relation.
    pub fn from_flat(flat: FlatRatings, version: u64) -> Self {
        let started = Instant::now();
        let matrix = RatingMatrix::build(&flat);
        Self {
            flat,
            matrix,
            version,
            loaded_at: Utc::now(),
            load_duration: started.elapsed(),
        }
    }

    pub fn flat(&self) -> &FlatRatings {
        &self.flat
    }

    pub fn matrix(&self) -> &RatingMatrix {
        &self.matrix
    }

    pub fn report(&self) -> &LoadReport {
        self.flat.report()
    }

    /// Incremented on every reload.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn load_duration(&self) -> Duration {
        self.load_duration
    }

    /// The `n` most-rated movies.
    pub fn top_movies(&self, n: usize) -> Vec<RankedMovie> {
        popularity::top_movies(&self.flat, n)
    }

    /// The `n` movies whose ratings correlate best with `title`.
    pub fn similar_movies(
        &self,
        title: &str,
        n: usize,
    ) -> Result<Vec<RankedMovie>, RecommendError> {
        item::similar_movies(&self.flat, &self.matrix, title, n)
    }

    /// The `n` best predicted unrated movies for `user_id`.
    pub fn recommended_movies(
        &self,
        user_id: u32,
        n: usize,
    ) -> Result<Vec<RankedMovie>, RecommendError> {
        user::recommended_movies(&self.flat, &self.matrix, user_id, n)
    }

    /// A uniformly random catalog movie.
    pub fn random_movie(&self) -> Result<RankedMovie, RecommendError> {
        self.random_movie_with(&mut rand::rng())
    }

    /// A uniformly random catalog movie drawn from `rng`.
    pub fn random_movie_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<RankedMovie, RecommendError> {
        self.flat
            .catalog()
            .choose(rng)
            .map(to_ranked_movie)
            .ok_or_else(|| RecommendError::InsufficientSupport("the catalog is empty".to_string()))
    }
}

/// The current Dataset, swappable as a whole.
#[derive(Debug)]
pub struct SharedDataset {
    current: RwLock<Arc<Dataset>>,
}

impl SharedDataset {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// Load the first Dataset from `source`.
    pub fn load(source: &dyn RatingSource) -> Result<Self> {
        Ok(Self::new(Dataset::load(source)?))
    }

    /// Snapshot of the current Dataset. Stays valid across reloads.
    pub fn current(&self) -> Arc<Dataset> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuild from `source` and publish the result. Returns the new version.
    ///
    /// On error the previous Dataset stays in place.
    pub fn reload(&self, source: &dyn RatingSource) -> Result<u64> {
        let next_version = self.current().version + 1;
        let dataset = Arc::new(Dataset::load_versioned(source, next_version)?);

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = dataset;
        info!(version = next_version, "Published reloaded dataset");
        Ok(next_version)
    }
}
