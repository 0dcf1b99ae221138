use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cinematch::config::Config;
use cinematch::context::Dataset;
use cinematch::output::{self, terminal};
use cinematch::recommend::{RankedMovie, RecommendError};

/// Cinematch: movie recommendations from rating data.
///
/// Ranks movies by popularity, by similarity to a movie you like, or by what
/// users with similar taste rated highly.
#[derive(Parser)]
#[command(name = "cinematch", version, about)]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the most-rated movies
    Top {
        /// How many movies to list (default: 10)
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Find movies whose ratings track a movie you like
    Similar {
        /// Movie title without the year (e.g. toy story)
        #[arg(required = true)]
        title: Vec<String>,

        /// How many movies to list (default: 10)
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Recommend movies for a user from what similar users enjoyed
    Recommend {
        /// The user id as it appears in ratings.csv
        user_id: u32,

        /// How many movies to list (default: 10)
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Pick a random movie from the catalog
    Random,

    /// Show dataset status (counts, matrix size, anomalies)
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinematch=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    config.require_data_files()?;

    let dataset = load_dataset(&config)?;

    match cli.command {
        Commands::Top { count } => {
            let count = config.clamp_count(count);
            let movies = dataset.top_movies(count);
            render_list(cli.json, &format!("Top {count} Most Rated"), Ok(movies))?;
        }

        Commands::Similar { title, count } => {
            let title = title.join(" ");
            let count = config.clamp_count(count);
            info!(title = %title, count, "Finding similar movies");
            let result = dataset.similar_movies(&title, count);
            render_list(cli.json, &format!("Movies Similar to \"{title}\""), result)?;
        }

        Commands::Recommend { user_id, count } => {
            let count = config.clamp_count(count);
            info!(user_id, count, "Recommending from similar users");
            let result = dataset.recommended_movies(user_id, count);
            render_list(
                cli.json,
                &format!("Recommended for User {user_id}"),
                result,
            )?;
        }

        Commands::Random => match dataset.random_movie() {
            Ok(movie) if cli.json => output::print_json(&movie)?,
            Ok(movie) => terminal::display_movie(&movie),
            Err(e) => render_error(cli.json, &e)?,
        },

        Commands::Status => {
            if cli.json {
                output::print_json(dataset.report())?;
            } else {
                let source = format!(
                    "{} + {}",
                    config.movies_path.display(),
                    config.ratings_path.display()
                );
                cinematch::status::show(&dataset, &source);
            }
        }
    }

    Ok(())
}

/// Load the dataset from the configured CSV files behind a spinner.
fn load_dataset(config: &Config) -> Result<Dataset> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg}")?);
    spinner.set_message("Loading ratings and building the rating matrix...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = Dataset::load(&config.source());
    spinner.finish_and_clear();
    result
}

/// Print a recommendation list, or explain why there isn't one.
fn render_list(
    json: bool,
    heading: &str,
    result: Result<Vec<RankedMovie>, RecommendError>,
) -> Result<()> {
    match result {
        Ok(movies) if json => output::print_json(&movies),
        Ok(movies) => {
            terminal::display_ranked_list(heading, &movies);
            Ok(())
        }
        Err(e) => render_error(json, &e),
    }
}

fn render_error(json: bool, err: &RecommendError) -> Result<()> {
    if json {
        output::print_json(&serde_json::json!({
            "error": err.kind(),
            "message": err.to_string(),
        }))
    } else {
        terminal::display_no_result(err);
        println!("{}", "Try `cinematch top` to see titles with plenty of ratings.".dimmed());
        Ok(())
    }
}
