//! # Recommender Facade
//!
//! This module coordinates the whole build and answers queries:
//! 1. Load rating triples from the CSV (or a cached snapshot)
//! 2. Classify movies into popularity tiers
//! 3. Pivot one rating matrix per tier
//! 4. Compute one cosine-similarity matrix per tier
//! 5. Persist the snapshot for the next run
//!
//! Construction is all-or-nothing: any failure leaves no partially built
//! instance behind. Once constructed, the facade is immutable; queries
//! are read-only and can be served from multiple threads without locking.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use data_loader::{load_ratings, MovieId, RatingRecord};

use crate::cache::{self, CacheError, Snapshot};
use crate::error::{RecommenderError, Result};
use crate::matrix::RatingMatrix;
use crate::similarity::{cosine_similarity, SimilarityMatrix};
use crate::tiers::{classify, Tier, TierAssignment};

/// Configuration for building a [`Recommender`]
#[derive(Debug, Clone)]
pub struct RecommenderOptions {
    /// Path to the scraped ratings CSV
    pub ratings_file: PathBuf,
    /// Movies with at least this many ratings are Popular
    pub min_ratings: usize,
    /// Non-popular movies with at most this many ratings are Niche
    pub max_ratings: usize,
    /// Read/write the snapshot cache next to the ratings file
    pub use_cache: bool,
    /// Result-list length used when the caller does not pass one
    pub n_recommendations: usize,
}

impl RecommenderOptions {
    /// Create options with the default thresholds (20 / 200, cache on,
    /// eight recommendations).
    pub fn new(ratings_file: impl Into<PathBuf>) -> Self {
        Self {
            ratings_file: ratings_file.into(),
            min_ratings: 20,
            max_ratings: 200,
            use_cache: true,
            n_recommendations: 8,
        }
    }

    pub fn with_min_ratings(mut self, min_ratings: usize) -> Self {
        self.min_ratings = min_ratings;
        self
    }

    pub fn with_max_ratings(mut self, max_ratings: usize) -> Self {
        self.max_ratings = max_ratings;
        self
    }

    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_n_recommendations(mut self, n_recommendations: usize) -> Self {
        self.n_recommendations = n_recommendations;
        self
    }
}

/// One recommended movie with its similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    pub score: f64,
}

/// Result of a recommendation query: ranked neighbors per tier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub famous: Vec<ScoredMovie>,
    pub niche: Vec<ScoredMovie>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.famous.is_empty() && self.niche.is_empty()
    }
}

/// The recommendation system.
///
/// Owns all matrices and the tier assignment for its lifetime; nothing
/// else retains references once construction completes.
#[derive(Debug)]
pub struct Recommender {
    tiers: TierAssignment,
    popular_matrix: RatingMatrix,
    niche_matrix: RatingMatrix,
    popular_similarity: SimilarityMatrix,
    niche_similarity: SimilarityMatrix,
    default_limit: usize,
}

impl Recommender {
    /// Build a recommender from the ratings file named in `options`,
    /// loading the cached snapshot instead when one is present and usable.
    ///
    /// An unusable cache (absent, truncated, wrong schema version) is
    /// never fatal: it logs and falls back to a full rebuild.
    pub fn new(options: &RecommenderOptions) -> Result<Self> {
        let cache_path = cache::cache_path_for(&options.ratings_file);

        if options.use_cache {
            match cache::load(&cache_path) {
                Ok(snapshot) => {
                    info!("Loaded snapshot from cache at {}", cache_path.display());
                    return Ok(Self::from_snapshot(snapshot, options.n_recommendations));
                }
                Err(CacheError::NotFound { .. }) => {
                    debug!("No cache at {}, building from source", cache_path.display());
                }
                Err(err) => {
                    warn!(
                        "Ignoring unusable cache at {}: {}",
                        cache_path.display(),
                        err
                    );
                }
            }
        }

        let snapshot = build_snapshot(options)?;

        if options.use_cache {
            // The facade is already valid in memory, so a failed write
            // only costs the next run a rebuild
            match cache::save(&cache_path, &snapshot) {
                Ok(()) => info!("Wrote snapshot cache to {}", cache_path.display()),
                Err(err) => warn!("Failed to write cache to {}: {}", cache_path.display(), err),
            }
        }

        Ok(Self::from_snapshot(snapshot, options.n_recommendations))
    }

    fn from_snapshot(snapshot: Snapshot, default_limit: usize) -> Self {
        Self {
            tiers: snapshot.tiers,
            popular_matrix: snapshot.popular_matrix,
            niche_matrix: snapshot.niche_matrix,
            popular_similarity: snapshot.popular_similarity,
            niche_similarity: snapshot.niche_similarity,
            default_limit,
        }
    }

    /// Ranked nearest neighbors of `movie_id`.
    ///
    /// The famous list comes from the Popular tier. When `include_niche`
    /// is set and the movie also has a Niche row, the niche list is
    /// filled from an independent lookup against the Niche tier. Each
    /// list is sorted by similarity descending (ties keep canonical row
    /// order), never contains the query movie itself, and holds at most
    /// `limit` entries — fewer when the tier has fewer candidates.
    #[instrument(skip(self))]
    pub fn recommend(
        &self,
        movie_id: &str,
        limit: usize,
        include_niche: bool,
    ) -> Result<Recommendations> {
        let start = Instant::now();
        let mut results = Recommendations::default();
        let mut found = false;

        if let Some(row) = self.popular_matrix.row_index(movie_id) {
            found = true;
            results.famous =
                top_neighbors(&self.popular_matrix, &self.popular_similarity, row, limit);
        }

        if include_niche {
            if let Some(row) = self.niche_matrix.row_index(movie_id) {
                found = true;
                results.niche =
                    top_neighbors(&self.niche_matrix, &self.niche_similarity, row, limit);
            }
        }

        if !found {
            return Err(RecommenderError::MovieNotFound(movie_id.to_string()));
        }

        debug!(
            "Recommended {} famous / {} niche movies in {:?}",
            results.famous.len(),
            results.niche.len(),
            start.elapsed()
        );
        Ok(results)
    }

    /// Same as [`recommend`](Self::recommend) with the configured default
    /// list length.
    pub fn recommend_default(&self, movie_id: &str, include_niche: bool) -> Result<Recommendations> {
        self.recommend(movie_id, self.default_limit, include_niche)
    }

    /// A movie's popularity tier, from tier-set membership alone.
    pub fn category(&self, movie_id: &str) -> Tier {
        self.tiers.tier_of(movie_id)
    }

    /// Configured default result-list length
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// (popular, niche) tier sizes, mostly for reporting
    pub fn tier_sizes(&self) -> (usize, usize) {
        (self.tiers.popular.len(), self.tiers.niche.len())
    }

    /// External page for a movie identifier, as rendered by presentation
    /// layers.
    pub fn letterboxd_url(movie_id: &str) -> String {
        format!("https://letterboxd.com/film/{}/", movie_id)
    }
}

/// Rank every other item in the tier against row `row`, best first.
fn top_neighbors(
    matrix: &RatingMatrix,
    similarity: &SimilarityMatrix,
    row: usize,
    limit: usize,
) -> Vec<ScoredMovie> {
    let mut neighbors: Vec<(usize, f64)> = similarity
        .row(row)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != row)
        .collect();

    // Stable sort: equal scores keep canonical row order
    neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    neighbors
        .into_iter()
        .take(limit)
        .map(|(index, score)| ScoredMovie {
            movie_id: matrix.items()[index].clone(),
            score,
        })
        .collect()
}

/// Run the full build pipeline: load, classify, pivot, correlate.
fn build_snapshot(options: &RecommenderOptions) -> Result<Snapshot> {
    let path = options.ratings_file.display().to_string();
    let start_total = Instant::now();

    let start = Instant::now();
    let records = load_ratings(&options.ratings_file)?;
    if records.is_empty() {
        return Err(RecommenderError::EmptyDataset { path });
    }
    info!(
        "Loaded {} rating records in {:?}",
        records.len(),
        start.elapsed()
    );

    let counts = count_ratings(&records);
    let tiers = classify(&counts, options.min_ratings, options.max_ratings);
    if tiers.is_empty() {
        return Err(RecommenderError::NoClassifiedMovies {
            path,
            min_ratings: options.min_ratings,
            max_ratings: options.max_ratings,
        });
    }
    info!(
        "Classified {} popular / {} niche movies",
        tiers.popular.len(),
        tiers.niche.len()
    );

    let start = Instant::now();
    let popular_matrix = RatingMatrix::build(&records, &tiers.popular);
    let niche_matrix = RatingMatrix::build(&records, &tiers.niche);
    info!("Pivoted rating matrices in {:?}", start.elapsed());

    let start = Instant::now();
    let popular_similarity = cosine_similarity(&popular_matrix);
    let niche_similarity = cosine_similarity(&niche_matrix);
    info!("Computed similarity matrices in {:?}", start.elapsed());

    info!("Build finished in {:?}", start_total.elapsed());
    Ok(Snapshot {
        tiers,
        popular_matrix,
        niche_matrix,
        popular_similarity,
        niche_similarity,
    })
}

/// Per-movie rating counts, accumulated in parallel.
///
/// Every record counts, valid token or not — the tiering signal is "how
/// often was this movie rated", not "how often was it rated legibly".
fn count_ratings(records: &[RatingRecord]) -> HashMap<MovieId, usize> {
    records
        .par_iter()
        .fold(HashMap::new, |mut local, record| {
            *local.entry(record.movie_id.clone()).or_insert(0) += 1;
            local
        })
        .reduce(HashMap::new, |mut acc, local| {
            for (movie_id, count) in local {
                *acc.entry(movie_id).or_insert(0) += count;
            }
            acc
        })
}
