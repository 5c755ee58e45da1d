//! # Engine Crate
//!
//! This crate implements the collaborative-filtering recommendation
//! engine: tiering, matrix construction, similarity, caching, and the
//! query facade.
//!
//! ## Components
//!
//! - **tiers**: Partition movies into Popular/Niche by rating count
//! - **matrix**: Pivot rating triples into dense item×user matrices
//! - **similarity**: Pairwise cosine item-similarity per tier
//! - **cache**: Persist a finished build as one bincode snapshot
//! - **recommender**: Build-or-load facade answering ranked queries
//! - **error**: Error types for construction and queries
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::{Recommender, RecommenderOptions};
//!
//! let options = RecommenderOptions::new("movies.csv").with_min_ratings(20);
//! let recommender = Recommender::new(&options)?;
//!
//! let results = recommender.recommend("godzilla-minus-one", 8, true)?;
//! for movie in &results.famous {
//!     println!("{} ({:.3})", movie.movie_id, movie.score);
//! }
//! ```

// Public modules
pub mod cache;
pub mod error;
pub mod matrix;
pub mod recommender;
pub mod similarity;
pub mod tiers;

// Re-export commonly used types
pub use error::{RecommenderError, Result};
pub use matrix::RatingMatrix;
pub use recommender::{Recommendations, Recommender, RecommenderOptions, ScoredMovie};
pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use tiers::{classify, Tier, TierAssignment};
