//! On-disk snapshot of a finished build.
//!
//! The five expensive objects (two rating matrices, two similarity
//! matrices, the tier assignment) are serialized as one bincode blob so a
//! repeat run against the same ratings file can skip reconstruction
//! entirely. The blob is all-or-nothing: a leading schema-version word
//! guards against layout drift, and any failure to read it back is
//! reported so the caller can fall back to a full rebuild.
//!
//! The cache is keyed by source path only. A changed CSV behind an
//! unchanged path yields a stale cache; the remedy is deleting the file
//! or building with the cache disabled.

use crate::matrix::RatingMatrix;
use crate::similarity::SimilarityMatrix;
use crate::tiers::TierAssignment;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Bumped whenever the serialized layout of [`Snapshot`] changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Extension the cache file carries, replacing the source extension
pub const CACHE_EXTENSION: &str = "cache";

/// Errors from reading or writing the cache blob.
///
/// These never escape the recommender facade; every variant is an
/// instruction to rebuild from source.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache file not found: {path}")]
    NotFound { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cache schema version {found} is incompatible (expected {expected})")]
    IncompatibleSchema { found: u32, expected: u32 },

    #[error("Cache blob is corrupt: {0}")]
    Corrupt(#[from] bincode::Error),
}

/// Everything a recommender needs to answer queries, in one blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tiers: TierAssignment,
    pub popular_matrix: RatingMatrix,
    pub niche_matrix: RatingMatrix,
    pub popular_similarity: SimilarityMatrix,
    pub niche_similarity: SimilarityMatrix,
}

/// Derive the cache path from the source CSV path
/// (e.g. `movies.csv` -> `movies.cache`).
pub fn cache_path_for(source: &Path) -> PathBuf {
    source.with_extension(CACHE_EXTENSION)
}

/// Write a snapshot to disk, replacing any existing blob at `path`.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), CacheError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&SCHEMA_VERSION.to_le_bytes())?;
    bincode::serialize_into(&mut writer, snapshot)?;
    writer.flush()?;
    debug!("Wrote cache snapshot to {}", path.display());
    Ok(())
}

/// Read a snapshot back. Fails if the file is absent, truncated, carries
/// a different schema version, or does not decode.
pub fn load(path: &Path) -> Result<Snapshot, CacheError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CacheError::NotFound {
            path: path.display().to_string(),
        },
        _ => CacheError::Io(e),
    })?;
    let mut reader = BufReader::new(file);

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let found = u32::from_le_bytes(version_bytes);
    if found != SCHEMA_VERSION {
        return Err(CacheError::IncompatibleSchema {
            found,
            expected: SCHEMA_VERSION,
        });
    }

    let snapshot = bincode::deserialize_from(&mut reader)?;
    debug!("Loaded cache snapshot from {}", path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RatingMatrix;
    use crate::similarity::cosine_similarity;
    use crate::tiers::classify;
    use data_loader::RatingRecord;
    use std::collections::HashMap;

    fn test_snapshot() -> Snapshot {
        let records = vec![
            RatingRecord::new("u1", "a", "★★★★"),
            RatingRecord::new("u2", "a", "★★★"),
            RatingRecord::new("u1", "b", "★★"),
        ];
        let counts: HashMap<String, usize> =
            [("a".to_string(), 2), ("b".to_string(), 1)].into_iter().collect();
        let tiers = classify(&counts, 2, 200);

        let popular_matrix = RatingMatrix::build(&records, &tiers.popular);
        let niche_matrix = RatingMatrix::build(&records, &tiers.niche);
        let popular_similarity = cosine_similarity(&popular_matrix);
        let niche_similarity = cosine_similarity(&niche_matrix);

        Snapshot {
            tiers,
            popular_matrix,
            niche_matrix,
            popular_similarity,
            niche_similarity,
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.cache");

        let snapshot = test_snapshot();
        save(&path, &snapshot).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.cache")).unwrap_err();
        assert!(matches!(err, CacheError::NotFound { .. }));
    }

    #[test]
    fn test_incompatible_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.cache");

        let snapshot = test_snapshot();
        save(&path, &snapshot).unwrap();

        // Stamp a future version over the header
        let mut bytes = std::fs::read(&path).unwrap();
        bytes[..4].copy_from_slice(&(SCHEMA_VERSION + 1).to_le_bytes());
        std::fs::write(&path, bytes).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(
            err,
            CacheError::IncompatibleSchema { expected: SCHEMA_VERSION, .. }
        ));
    }

    #[test]
    fn test_truncated_blob_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.cache");

        let snapshot = test_snapshot();
        save(&path, &snapshot).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_cache_path_replaces_extension() {
        assert_eq!(
            cache_path_for(Path::new("data/movies.csv")),
            PathBuf::from("data/movies.cache")
        );
    }
}
