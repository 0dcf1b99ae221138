// Composition tests — verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   CSV / in-memory source -> Loader -> Matrix -> Recommenders -> Enricher
// plus the shared context and its reload swap. Only the CSV test touches the
// filesystem (temp files).

use std::io::Write;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;

use cinematch::context::{Dataset, SharedDataset};
use cinematch::dataset::csv_source::CsvSource;
use cinematch::dataset::models::{MovieRecord, RatingEvent};
use cinematch::dataset::traits::InMemorySource;
use cinematch::output::truncate_chars;
use cinematch::recommend::RecommendError;

fn source(extra_user: bool) -> InMemorySource {
    let movies = vec![
        MovieRecord {
            id: 1,
            title: "Toy Story (1995)".to_string(),
            genres: "Adventure|Animation|Children".to_string(),
        },
        MovieRecord {
            id: 2,
            title: "Jumanji (1995)".to_string(),
            genres: "Adventure|Children|Fantasy".to_string(),
        },
        MovieRecord {
            id: 3,
            title: "Heat (1995)".to_string(),
            genres: "Action|Crime|Thriller".to_string(),
        },
        MovieRecord {
            id: 4,
            title: "Never Rated (1990)".to_string(),
            genres: "Drama".to_string(),
        },
    ];

    let mut ratings = Vec::new();
    for user_id in 1..=12u32 {
        let base = 1.0 + (user_id % 4) as f64;
        ratings.push(RatingEvent {
            user_id,
            movie_id: 1,
            rating: base,
        });
        ratings.push(RatingEvent {
            user_id,
            movie_id: 2,
            rating: base + 0.5,
        });
        if user_id % 2 == 0 {
            ratings.push(RatingEvent {
                user_id,
                movie_id: 3,
                rating: 5.0 - base,
            });
        }
    }
    if extra_user {
        ratings.push(RatingEvent {
            user_id: 50,
            movie_id: 3,
            rating: 4.0,
        });
    }

    InMemorySource::new(movies, ratings)
}

// ============================================================
// Chain: Source -> Dataset -> all four operations
// ============================================================

#[test]
fn dataset_answers_every_operation() {
    let dataset = Dataset::load(&source(false)).unwrap();

    let top = dataset.top_movies(2);
    assert_eq!(top.len(), 2);
    assert!(top.iter().all(|m| m.title != "Heat"));

    let similar = dataset.similar_movies("toy story", 5).unwrap();
    assert_eq!(similar[0].title, "Jumanji");
    assert_eq!(similar[0].year.as_deref(), Some("1995"));
    // Heat has only 6 ratings
    assert!(similar.iter().all(|m| m.title != "Heat"));

    // Odd users never rated Heat
    let recommended = dataset.recommended_movies(1, 5).unwrap();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0].title, "Heat");

    let err = dataset.recommended_movies(999, 5).unwrap_err();
    assert_eq!(err, RecommendError::UserNotFound(999));
}

#[test]
fn similar_movies_input_is_case_insensitive() {
    let dataset = Dataset::load(&source(false)).unwrap();
    let lower = dataset.similar_movies("toy story", 3).unwrap();
    let upper = dataset.similar_movies("  TOY STORY ", 3).unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn random_movie_comes_from_catalog() {
    let dataset = Dataset::load(&source(false)).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let movie = dataset.random_movie_with(&mut rng).unwrap();
        assert!(dataset
            .flat()
            .catalog()
            .iter()
            .any(|m| m.display_title == movie.title));
    }
}

#[test]
fn random_movie_on_empty_catalog() {
    let dataset = Dataset::load(&InMemorySource::default()).unwrap();
    let err = dataset.random_movie().unwrap_err();
    assert!(matches!(err, RecommendError::InsufficientSupport(_)));
    assert!(dataset.top_movies(5).is_empty());
}

// ============================================================
// Shared context: snapshot + reload swap
// ============================================================

#[test]
fn reload_swaps_whole_dataset() {
    let shared = SharedDataset::load(&source(false)).unwrap();
    let before: Arc<Dataset> = shared.current();
    assert_eq!(before.version(), 1);
    assert_eq!(before.matrix().n_users(), 12);

    let version = shared.reload(&source(true)).unwrap();
    assert_eq!(version, 2);

    let after = shared.current();
    assert_eq!(after.version(), 2);
    assert_eq!(after.matrix().n_users(), 13);
    // The old snapshot is untouched
    assert_eq!(before.matrix().n_users(), 12);
}

#[test]
fn reload_with_identical_input_gives_identical_matrix() {
    let shared = SharedDataset::load(&source(false)).unwrap();
    let before = shared.current();
    shared.reload(&source(false)).unwrap();
    let after = shared.current();

    assert_eq!(before.matrix(), after.matrix());
    assert_eq!(before.report(), after.report());
}

#[test]
fn readers_share_snapshot_across_threads() {
    let shared = Arc::new(SharedDataset::load(&source(false)).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || shared.current().top_movies(3).len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}

// ============================================================
// Chain: CSV files -> Dataset
// ============================================================

#[test]
fn csv_files_load_end_to_end() {
    let mut movies = NamedTempFile::new().unwrap();
    writeln!(movies, "movieId,title,genres").unwrap();
    writeln!(movies, "1,Toy Story (1995),Adventure|Animation").unwrap();
    writeln!(movies, "2,\"Dr. Strangelove (1964) (Special Edition)\",Comedy|War").unwrap();
    writeln!(movies, "3,Broken Title (1999,Drama").unwrap();

    let mut ratings = NamedTempFile::new().unwrap();
    writeln!(ratings, "userId,movieId,rating,timestamp").unwrap();
    writeln!(ratings, "1,1,4.0,964982703").unwrap();
    writeln!(ratings, "1,2,5.0,964982931").unwrap();
    writeln!(ratings, "2,2,3.0,964982400").unwrap();
    writeln!(ratings, "2,3,2.0,964982400").unwrap();

    let dataset = Dataset::load(&CsvSource::new(movies.path(), ratings.path())).unwrap();
    let report = dataset.report();
    assert_eq!(report.title_anomalies, 1);
    assert_eq!(report.joined, 4);

    let top = dataset.top_movies(1);
    assert_eq!(top[0].title, "Dr. Strangelove");
    assert_eq!(top[0].year.as_deref(), Some("1964"));
    assert_eq!(top[0].genres, vec!["Comedy", "War"]);
}

#[test]
fn truncate_chars_handles_accented_titles() {
    assert_eq!(truncate_chars("Amélie", 10), "Amélie");
    assert_eq!(truncate_chars("Amélie", 3), "Amé...");
}
