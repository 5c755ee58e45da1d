//! Popularity tier classification.
//!
//! Movies are partitioned by how many ratings they received: widely rated
//! movies go to the Popular tier, sparsely rated ones to the Niche tier.
//! The two sets are disjoint by construction, so a movie can never carry
//! two similarity rows for the same query. Movies that satisfy neither
//! predicate stay unclassified and are excluded from both matrices.

use data_loader::MovieId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use tracing::debug;

/// Which popularity bucket a movie falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Popular,
    Niche,
    Unknown,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Popular => write!(f, "popular"),
            Tier::Niche => write!(f, "niche"),
            Tier::Unknown => write!(f, "unknown"),
        }
    }
}

/// Disjoint popular/niche movie sets.
///
/// BTreeSet keeps each tier in sorted identifier order, which is also the
/// canonical row order of the tier's rating matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssignment {
    pub popular: BTreeSet<MovieId>,
    pub niche: BTreeSet<MovieId>,
}

impl TierAssignment {
    /// Report a movie's tier purely from set membership.
    pub fn tier_of(&self, movie_id: &str) -> Tier {
        if self.popular.contains(movie_id) {
            Tier::Popular
        } else if self.niche.contains(movie_id) {
            Tier::Niche
        } else {
            Tier::Unknown
        }
    }

    /// True when neither tier holds any movie.
    pub fn is_empty(&self) -> bool {
        self.popular.is_empty() && self.niche.is_empty()
    }
}

/// Partition movies into popularity tiers from their rating counts.
///
/// - Popular: count >= `min_ratings`
/// - Niche: count < `min_ratings` and count <= `max_ratings`
///
/// A movie with `max_ratings < count < min_ratings` (possible only when
/// the thresholds leave a gap) lands in neither tier.
pub fn classify(
    rating_counts: &HashMap<MovieId, usize>,
    min_ratings: usize,
    max_ratings: usize,
) -> TierAssignment {
    let mut assignment = TierAssignment::default();

    for (movie_id, &count) in rating_counts {
        if count >= min_ratings {
            assignment.popular.insert(movie_id.clone());
        } else if count <= max_ratings {
            assignment.niche.insert(movie_id.clone());
        }
    }

    debug!(
        "Classified {} popular, {} niche, {} unclassified movies",
        assignment.popular.len(),
        assignment.niche.len(),
        rating_counts.len() - assignment.popular.len() - assignment.niche.len()
    );

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<MovieId, usize> {
        pairs
            .iter()
            .map(|(id, count)| (id.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_tiers_are_disjoint() {
        let counts = counts(&[("a", 5), ("b", 20), ("c", 300), ("d", 1), ("e", 199)]);

        for (min_ratings, max_ratings) in [(20, 200), (1, 200), (50, 10), (2, 2)] {
            let assignment = classify(&counts, min_ratings, max_ratings);
            assert!(
                assignment.popular.is_disjoint(&assignment.niche),
                "overlap with min={} max={}",
                min_ratings,
                max_ratings
            );
        }
    }

    #[test]
    fn test_default_thresholds() {
        let counts = counts(&[("rare", 3), ("hit", 25), ("mid", 150)]);
        let assignment = classify(&counts, 20, 200);

        assert!(assignment.popular.contains("hit"));
        assert!(assignment.niche.contains("rare"));
        assert!(assignment.niche.contains("mid"));
        assert_eq!(assignment.tier_of("hit"), Tier::Popular);
        assert_eq!(assignment.tier_of("rare"), Tier::Niche);
        assert_eq!(assignment.tier_of("nope"), Tier::Unknown);
    }

    #[test]
    fn test_min_ratings_one_empties_niche() {
        // Every movie has at least one rating, so everything is popular
        let counts = counts(&[("a", 1), ("b", 7)]);
        let assignment = classify(&counts, 1, 200);

        assert_eq!(assignment.popular.len(), 2);
        assert!(assignment.niche.is_empty());
    }

    #[test]
    fn test_threshold_gap_leaves_movies_unclassified() {
        // max < min opens a band where movies hit neither predicate
        let counts = counts(&[("low", 5), ("band", 15), ("high", 40)]);
        let assignment = classify(&counts, 20, 10);

        assert!(assignment.popular.contains("high"));
        assert!(assignment.niche.contains("low"));
        assert_eq!(assignment.tier_of("band"), Tier::Unknown);
    }

    #[test]
    fn test_empty_counts() {
        let assignment = classify(&HashMap::new(), 20, 200);
        assert!(assignment.is_empty());
    }
}
