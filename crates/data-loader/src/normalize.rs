//! Star-rating normalization.
//!
//! Letterboxd ratings come out of the scraper as symbolic star tokens in
//! half-star increments from "½" to "★★★★★". This module maps them onto a
//! 1..=10 integer scale. The mapping is injective and order-preserving:
//! more stars always means a higher number.

/// Numeric rating on the half-star scale (1 = half a star, 10 = five stars)
pub type NumericRating = u8;

/// All valid star tokens, in ascending order of the value they map to.
///
/// Index i maps to numeric rating i + 1. Kept public so callers (and
/// tests) can enumerate the alphabet without duplicating it.
pub const STAR_TOKENS: [&str; 10] = [
    "½", "★", "★½", "★★", "★★½", "★★★", "★★★½", "★★★★", "★★★★½", "★★★★★",
];

/// Convert a star-rating token to its numeric value.
///
/// Returns `None` for any token outside the fixed ten-entry alphabet.
/// Absent is deliberately distinct from a low rating; how to treat it is
/// the caller's decision (the matrix builder drops the record, leaving
/// the neutral fill in place).
pub fn star_to_numeric(token: &str) -> Option<NumericRating> {
    match token {
        "½" => Some(1),
        "★" => Some(2),
        "★½" => Some(3),
        "★★" => Some(4),
        "★★½" => Some(5),
        "★★★" => Some(6),
        "★★★½" => Some(7),
        "★★★★" => Some(8),
        "★★★★½" => Some(9),
        "★★★★★" => Some(10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_tokens_map_into_scale() {
        for token in STAR_TOKENS {
            let value = star_to_numeric(token).unwrap();
            assert!((1..=10).contains(&value), "{} mapped to {}", token, value);
        }
    }

    #[test]
    fn test_mapping_is_injective() {
        let values: HashSet<NumericRating> = STAR_TOKENS
            .iter()
            .map(|t| star_to_numeric(t).unwrap())
            .collect();
        assert_eq!(values.len(), STAR_TOKENS.len());
    }

    #[test]
    fn test_mapping_is_order_preserving() {
        // STAR_TOKENS is ordered by star count, so values must be strictly
        // increasing along it
        let values: Vec<NumericRating> = STAR_TOKENS
            .iter()
            .map(|t| star_to_numeric(t).unwrap())
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_unknown_tokens_are_absent() {
        assert_eq!(star_to_numeric(""), None);
        assert_eq!(star_to_numeric("★★★★★★"), None);
        assert_eq!(star_to_numeric("3.5"), None);
        assert_eq!(star_to_numeric("liked"), None);
    }
}
