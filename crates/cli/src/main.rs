use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{Recommendations, Recommender, RecommenderOptions, ScoredMovie, Tier};
use std::path::PathBuf;
use std::time::Instant;

/// WhatToWatch - Movie recommendations from Letterboxd ratings
#[derive(Parser)]
#[command(name = "what-to-watch")]
#[command(about = "Movie recommendation engine using collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the scraped ratings CSV
    #[arg(short, long, default_value = "movies.csv")]
    ratings_file: PathBuf,

    /// Movies with at least this many ratings count as popular
    #[arg(long, default_value = "20")]
    min_ratings: usize,

    /// Non-popular movies with at most this many ratings count as niche
    #[arg(long, default_value = "200")]
    max_ratings: usize,

    /// Skip the snapshot cache and always rebuild from the CSV
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to the given one
    Recommend {
        /// Letterboxd film id (e.g. 'inception', 'godzilla-minus-one')
        #[arg(long)]
        movie_id: String,

        /// Number of recommendations to return (defaults to the engine's
        /// configured list length)
        #[arg(long)]
        limit: Option<usize>,

        /// Also search the niche tier
        #[arg(long)]
        include_niche: bool,
    },

    /// Show which popularity tier a movie falls into
    Category {
        /// Letterboxd film id to look up
        #[arg(long)]
        movie_id: String,
    },

    /// Build the matrices and warm the snapshot cache
    Build,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let options = RecommenderOptions::new(&cli.ratings_file)
        .with_min_ratings(cli.min_ratings)
        .with_max_ratings(cli.max_ratings)
        .with_use_cache(!cli.no_cache);

    // Build or load the recommender once, then dispatch (this may take a
    // moment on a cold cache)
    println!(
        "Loading ratings from {}...",
        cli.ratings_file.display()
    );
    let start = Instant::now();
    let recommender = Recommender::new(&options)
        .context("Failed to construct recommender")?;
    println!("{} Recommender ready in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend {
            movie_id,
            limit,
            include_niche,
        } => handle_recommend(&recommender, &movie_id, limit, include_niche)?,
        Commands::Category { movie_id } => handle_category(&recommender, &movie_id),
        Commands::Build => handle_build(&recommender),
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &Recommender,
    movie_id: &str,
    limit: Option<usize>,
    include_niche: bool,
) -> Result<()> {
    let results: Recommendations = match limit {
        Some(limit) => recommender.recommend(movie_id, limit, include_niche)?,
        None => recommender.recommend_default(movie_id, include_niche)?,
    };

    println!();
    println!(
        "{}",
        format!(
            "Movies similar to {} ({}):",
            movie_id,
            recommender.category(movie_id)
        )
        .bold()
        .blue()
    );

    print_scored_list("Famous", &results.famous);
    if include_niche {
        print_scored_list("Niche", &results.niche);
    }

    Ok(())
}

/// Handle the 'category' command
fn handle_category(recommender: &Recommender, movie_id: &str) {
    let tier = recommender.category(movie_id);
    match tier {
        Tier::Unknown => println!("{} is not in the dataset", movie_id.bold()),
        _ => println!("{} is a {} movie", movie_id.bold(), tier.to_string().cyan()),
    }
}

/// Handle the 'build' command
fn handle_build(recommender: &Recommender) {
    let (popular, niche) = recommender.tier_sizes();
    println!("{} popular movies, {} niche movies indexed", popular, niche);
}

/// Helper to print one ranked result list
fn print_scored_list(label: &str, movies: &[ScoredMovie]) {
    println!();
    println!("{}", format!("{} movies:", label).bold());
    if movies.is_empty() {
        println!("  (none found)");
        return;
    }
    for (rank, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} (score {:.3}) - {}",
            (rank + 1).to_string().green(),
            movie.movie_id,
            movie.score,
            Recommender::letterboxd_url(&movie.movie_id)
        );
    }
}
