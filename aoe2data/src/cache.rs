//! Snapshot cache for parsed dat files.
//!
//! Parsing a full dat takes a while, so the parsed graph is stored as JSON keyed
//! by the SHA-256 of the source file. The cache is never authoritative: a
//! missing, stale or corrupted snapshot is logged and the source is parsed again.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::error::DatError;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Cache invalid: {0}")]
    Invalid(String),
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),
    #[error(transparent)]
    Parse(#[from] DatError),
}

/// Mode for cache validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheValidationMode {
    /// Trust the snapshot once its key matches the source hash.
    #[default]
    Fast,
    /// Also re-hash the snapshot payload against the stored data hash.
    Strict,
}

/// Sidecar written next to each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Hex SHA-256 of the source dat file.
    pub source_hash: String,
    /// SHA-256 of the snapshot payload itself.
    #[serde(default)]
    pub data_hash: Option<[u8; 32]>,
    /// Crate version that wrote the snapshot. Snapshots from another version
    /// may not match the current model and are discarded.
    #[serde(default)]
    pub toolkit_version: String,
    pub generated_at: SystemTime,
}

impl CacheMetadata {
    fn new(source_hash: String, data_hash: [u8; 32]) -> Self {
        Self {
            source_hash,
            data_hash: Some(data_hash),
            toolkit_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: SystemTime::now(),
        }
    }

    /// Check the sidecar belongs to `source_hash` and this build.
    pub fn is_valid(&self, source_hash: &str) -> bool {
        self.source_hash == source_hash && self.toolkit_version == env!("CARGO_PKG_VERSION")
    }
}

/// Directory of parsed-dat snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
    mode: CacheValidationMode,
}

impl SnapshotCache {
    pub fn new(dir: impl Into<PathBuf>, mode: CacheValidationMode) -> Self {
        Self {
            dir: dir.into(),
            mode,
        }
    }

    /// Cache rooted at `~/.cache/aoe2mod`.
    pub fn in_default_dir(mode: CacheValidationMode) -> Self {
        Self::new(default_cache_dir(), mode)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot and metadata paths for a source hash.
    pub fn paths_for(&self, source_hash: &str) -> (PathBuf, PathBuf) {
        (
            self.dir.join(format!("{}.json", source_hash)),
            self.dir.join(format!("{}.meta.json", source_hash)),
        )
    }

    /// Load the snapshot for `source`, or run `parse` and store its result.
    pub fn load_or_parse<T, F>(&self, source: &Path, parse: F) -> Result<T, CacheError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&Path) -> Result<T, DatError>,
    {
        if !source.is_file() {
            return Err(CacheError::SourceNotFound(source.to_path_buf()));
        }
        let source_hash = compute_file_hash(source)?;

        match self.try_load(&source_hash) {
            Ok(Some(resource)) => {
                log::info!("Using cached snapshot of {:?}", source);
                return Ok(resource);
            }
            Ok(None) => log::info!("No cache found for {:?}, parsing", source),
            Err(e) => log::warn!("Discarding cached snapshot of {:?}: {}", source, e),
        }

        let resource = parse(source)?;

        if let Err(e) = self.store(&source_hash, &resource) {
            log::warn!("Failed to write snapshot cache in {:?}: {}", self.dir, e);
        }

        Ok(resource)
    }

    fn try_load<T: DeserializeOwned>(&self, source_hash: &str) -> Result<Option<T>, CacheError> {
        let (cache_path, meta_path) = self.paths_for(source_hash);
        if !cache_path.exists() || !meta_path.exists() {
            return Ok(None);
        }

        let meta_json = fs::read_to_string(&meta_path)?;
        let metadata: CacheMetadata = serde_json::from_str(&meta_json)?;
        if !metadata.is_valid(source_hash) {
            return Err(CacheError::Invalid(format!(
                "metadata written for {} by version {}",
                metadata.source_hash, metadata.toolkit_version
            )));
        }

        let cache_json = fs::read_to_string(&cache_path)?;

        if self.mode == CacheValidationMode::Strict {
            match metadata.data_hash {
                Some(expected) if expected == compute_sha256_bytes(cache_json.as_bytes()) => {}
                Some(_) => return Err(CacheError::Invalid("data hash mismatch".into())),
                None => return Err(CacheError::Invalid("missing data hash".into())),
            }
        }

        Ok(Some(serde_json::from_str(&cache_json)?))
    }

    fn store<T: Serialize>(&self, source_hash: &str, resource: &T) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let (cache_path, meta_path) = self.paths_for(source_hash);

        let cache_json = serde_json::to_string(resource)?;
        let metadata = CacheMetadata::new(
            source_hash.to_string(),
            compute_sha256_bytes(cache_json.as_bytes()),
        );

        fs::write(&cache_path, &cache_json)?;
        fs::write(&meta_path, serde_json::to_string_pretty(&metadata)?)?;

        log::info!("Cached snapshot at {:?}", cache_path);
        Ok(())
    }
}

fn default_cache_dir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join(".cache").join("aoe2mod")
    } else {
        PathBuf::from(".cache/aoe2mod")
    }
}

/// Compute SHA256 hash of bytes.
fn compute_sha256_bytes(bytes: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Compute the hex SHA256 hash of a file.
pub fn compute_file_hash(path: &Path) -> Result<String, CacheError> {
    use sha2::{Digest, Sha256};

    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let hash = hasher.finalize();
    Ok(format!("{:x}", hash))
}
