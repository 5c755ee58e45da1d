//! # Data Loader Crate
//!
//! This crate handles ingesting the scraped Letterboxd ratings CSV.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RatingRecord, UserId, MovieId)
//! - **parser**: Read and validate the `User, Film ID, Rating` CSV
//! - **normalize**: Map star-rating tokens onto the 1..=10 numeric scale
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{load_ratings, star_to_numeric};
//! use std::path::Path;
//!
//! let records = load_ratings(Path::new("movies.csv"))?;
//! let first = star_to_numeric(&records[0].rating);
//! ```

// Public modules
pub mod error;
pub mod normalize;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use normalize::{star_to_numeric, NumericRating, STAR_TOKENS};
pub use parser::{load_ratings, read_ratings};
pub use types::{MovieId, RatingRecord, UserId};
