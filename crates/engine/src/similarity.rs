//! Pairwise cosine item-similarity.
//!
//! The full n×n similarity grid is the dominant cost of a build
//! (O(n² · m) for n items and m users), so it is computed as a single
//! matrix product over L2-normalized rows rather than with nested scalar
//! loops. Row normalization is data-parallel via ndarray's rayon bridge.

use crate::matrix::RatingMatrix;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Square item×item cosine-similarity table for one tier.
///
/// Shares its row ordering with the rating matrix it was computed from.
/// Symmetric; diagonal is exactly 1.0 for every item with a nonzero
/// rating row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Number of items (the matrix is square)
    pub fn n_items(&self) -> usize {
        self.values.nrows()
    }

    /// Similarity of one item against every item in the tier
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }
}

/// Compute the full pairwise cosine similarity for a tier.
///
/// sim(i, j) = (row_i · row_j) / (‖row_i‖ · ‖row_j‖). A zero-norm row
/// (an item whose ratings all collapsed to the neutral fill) reads 0.0
/// against everything, including itself, instead of dividing by zero.
pub fn cosine_similarity(matrix: &RatingMatrix) -> SimilarityMatrix {
    let mut normalized = matrix.values().to_owned();

    normalized
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut row| {
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        });

    let mut values = normalized.dot(&normalized.t());

    // The product puts ~1.0 on the diagonal; pin it exactly so
    // self-similarity is not subject to floating-point drift. Zero-norm
    // rows stay at 0.0.
    for i in 0..values.nrows() {
        if normalized.row(i).iter().any(|&v| v != 0.0) {
            values[[i, i]] = 1.0;
        }
    }

    debug!("Computed {0}x{0} similarity matrix", values.nrows());
    SimilarityMatrix { values }
}
