//! Error types for the engine crate.
//!
//! Cache failures are deliberately absent here: they are recovered
//! internally by rebuilding from source and never surface to callers
//! (see `cache::CacheError`).

use data_loader::DataLoadError;
use thiserror::Error;

/// Errors surfaced by the recommender facade
#[derive(Error, Debug)]
pub enum RecommenderError {
    /// Query-time lookup failure: the id is in neither active tier
    #[error("Movie '{0}' not found in dataset")]
    MovieNotFound(String),

    /// The ratings file parsed fine but held no data rows
    #[error("Ratings file {path} contains no rating records")]
    EmptyDataset { path: String },

    /// Every movie fell outside both popularity tiers
    #[error("No movies in {path} fall into any popularity tier (min_ratings={min_ratings}, max_ratings={max_ratings})")]
    NoClassifiedMovies {
        path: String,
        min_ratings: usize,
        max_ratings: usize,
    },

    /// Ingestion failure, fatal to construction
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommenderError>;
