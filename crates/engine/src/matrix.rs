//! Dense item×user rating matrix construction.
//!
//! One matrix is built per popularity tier by pivoting the raw rating
//! triples: rows are movies, columns are users, cells hold the numeric
//! rating with 0.0 standing in for "no rating recorded". Row and column
//! orderings are sorted by identifier so rebuilding from identical input
//! always produces identical indices.

use data_loader::{star_to_numeric, MovieId, RatingRecord, UserId};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Value written for an (item, user) pair with no recorded rating.
///
/// Zero contributes no directional signal to cosine similarity.
pub const NEUTRAL_FILL: f64 = 0.0;

/// Dense item×user rating table for one tier.
///
/// Immutable once built; the similarity engine and the recommender only
/// ever read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingMatrix {
    /// Row labels, sorted ascending. This is the canonical item ordering
    /// shared with the tier's similarity matrix.
    items: Vec<MovieId>,
    /// Column labels, sorted ascending: every user with at least one
    /// record against an in-tier item.
    users: Vec<UserId>,
    values: Array2<f64>,
}

impl RatingMatrix {
    /// Pivot raw rating triples into a dense matrix over `item_set`.
    ///
    /// Records for movies outside `item_set` are ignored. Tokens outside
    /// the star alphabet are dropped, leaving the neutral fill in place
    /// (the user still contributes a column if any of their records hit
    /// the tier). When the same (item, user) pair is rated more than
    /// once, the last valid record in input order wins.
    pub fn build(records: &[RatingRecord], item_set: &BTreeSet<MovieId>) -> Self {
        let items: Vec<MovieId> = item_set.iter().cloned().collect();

        let user_set: BTreeSet<&str> = records
            .iter()
            .filter(|r| item_set.contains(&r.movie_id))
            .map(|r| r.user_id.as_str())
            .collect();
        let users: Vec<UserId> = user_set.into_iter().map(String::from).collect();

        let user_index: HashMap<&str, usize> = users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.as_str(), i))
            .collect();

        let mut values = Array2::from_elem((items.len(), users.len()), NEUTRAL_FILL);
        for record in records {
            let Ok(row) = items.binary_search_by(|m| m.as_str().cmp(&record.movie_id)) else {
                continue;
            };
            if let Some(rating) = star_to_numeric(&record.rating) {
                // users column exists for every in-tier record by construction
                let col = user_index[record.user_id.as_str()];
                values[[row, col]] = f64::from(rating);
            }
        }

        debug!(
            "Built {}x{} rating matrix from {} records",
            items.len(),
            users.len(),
            records.len()
        );

        Self {
            items,
            users,
            values,
        }
    }

    /// Number of movies (rows)
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Number of users (columns)
    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    /// Row labels in canonical order
    pub fn items(&self) -> &[MovieId] {
        &self.items
    }

    /// Column labels in canonical order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// The raw values, one row per item
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Row index of a movie, if it is part of this tier.
    ///
    /// Items are sorted, so this is a binary search.
    pub fn row_index(&self, movie_id: &str) -> Option<usize> {
        self.items
            .binary_search_by(|m| m.as_str().cmp(movie_id))
            .ok()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
