//! Core domain types for the ratings dataset.
//!
//! The scraped dataset identifies both users and films by slug-like
//! strings (the same identifiers Letterboxd uses in its URLs), so the
//! aliases here are `String` rather than numeric ids.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user (Letterboxd username)
pub type UserId = String;

/// Unique identifier for a film (URL slug, e.g. "godzilla-minus-one")
pub type MovieId = String;

/// One raw rating triple as it appears in the scraped CSV.
///
/// The rating is kept as the symbolic star token from the source; it is
/// only converted to a numeric value when a matrix is built. Records are
/// immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "User")]
    pub user_id: UserId,

    #[serde(rename = "Film ID")]
    pub movie_id: MovieId,

    /// Star-rating token, e.g. "★★★½". May be any string; tokens outside
    /// the known alphabet normalize to absent.
    #[serde(rename = "Rating")]
    pub rating: String,
}

impl RatingRecord {
    /// Convenience constructor, mostly for tests.
    pub fn new(
        user_id: impl Into<UserId>,
        movie_id: impl Into<MovieId>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            movie_id: movie_id.into(),
            rating: rating.into(),
        }
    }
}
