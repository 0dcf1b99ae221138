// Colored terminal output for recommendation lists.
//
// main.rs delegates all table formatting here so the commands only decide
// what to show.

use colored::Colorize;

use crate::recommend::{RankedMovie, RecommendError};

/// Widest title shown before truncation.
const TITLE_WIDTH: usize = 44;

/// Display a ranked list under a heading.
pub fn display_ranked_list(heading: &str, movies: &[RankedMovie]) {
    println!(
        "\n{}",
        format!("=== {heading} ({} movies) ===", movies.len()).bold()
    );
    println!();

    if movies.is_empty() {
        println!("  {}", "Nothing to show.".dimmed());
        return;
    }

    println!(
        "  {:>4}  {:<47} {:<6}  {}",
        "Rank".dimmed(),
        "Title".dimmed(),
        "Year".dimmed(),
        "Genres".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, movie) in movies.iter().enumerate() {
        println!(
            "  {:>4}. {:<47} {:<6}  {}",
            i + 1,
            super::truncate_chars(&movie.title, TITLE_WIDTH),
            movie.year.as_deref().unwrap_or("?"),
            movie.genre_label().dimmed(),
        );
    }
    println!();
}

/// Display a single movie (used by `cinematch random`).
pub fn display_movie(movie: &RankedMovie) {
    println!("\n  {}", movie.title.bold());
    if let Some(year) = &movie.year {
        println!("  Year:   {year}");
    }
    println!("  Genres: {}", movie.genre_label());
    println!();
}

/// Explain why a query produced no list.
pub fn display_no_result(err: &RecommendError) {
    match err {
        RecommendError::MovieNotFound(title) => {
            println!("{} No movie titled \"{}\".", "Not found:".yellow(), title);
            println!(
                "  {}",
                "Titles are matched without the year, e.g. \"toy story\".".dimmed()
            );
        }
        RecommendError::UserNotFound(user_id) => {
            println!("{} No ratings from user {}.", "Not found:".yellow(), user_id);
        }
        RecommendError::InsufficientSupport(reason) => {
            println!("{} {}", "No recommendations:".yellow(), reason);
        }
    }
}
