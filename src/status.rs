// Dataset status display — load counters, matrix shape, load time.

use crate::context::Dataset;

/// Display dataset status to the terminal.
pub fn show(dataset: &Dataset, source_display: &str) {
    let report = dataset.report();
    let matrix = dataset.matrix();

    println!("Source: {source_display}");
    println!(
        "Loaded: {} (version {}, {} ms)",
        dataset.loaded_at().format("%Y-%m-%d %H:%M:%S UTC"),
        dataset.version(),
        dataset.load_duration().as_millis()
    );
    println!(
        "Movies: {} in catalog, {} without ratings",
        report.movies - report.duplicate_movie_ids,
        report.unrated_movies
    );
    println!(
        "Ratings: {} read, {} joined, {} for unknown movies, {} invalid",
        report.ratings, report.joined, report.dropped_ratings, report.invalid_ratings
    );
    println!(
        "Matrix: {} users x {} titles, {:.2}% filled",
        matrix.n_users(),
        matrix.n_titles(),
        matrix.density() * 100.0
    );

    if report.merged_titles > 0 {
        println!(
            "Merged titles: {} (several movie ids share one title)",
            report.merged_titles
        );
    }
    if matrix.duplicates_collapsed() > 0 {
        println!(
            "Duplicate ratings: {} user/title cells averaged",
            matrix.duplicates_collapsed()
        );
    }
    if report.title_anomalies > 0 {
        println!(
            "Title anomalies: {} (partial parse used)",
            report.title_anomalies
        );
    }
    if report.duplicate_movie_ids > 0 {
        println!("Duplicate movie ids: {} (later rows ignored)", report.duplicate_movie_ids);
    }
}
