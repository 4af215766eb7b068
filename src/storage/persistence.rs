//! Ordered fallback persistence
//!
//! Artifacts are written to the first viable tier:
//! 1. `<local-root>/<prefix>/` if that directory already exists
//! 2. The configured object-store bucket under `<prefix>/`
//! 3. `<fallback-root>/<prefix>/`, created if absent
//!
//! `<prefix>` is `data` for datasets and `log` for error logs.

use crate::config::StorageSettings;
use crate::storage::csv_io::{
    decode_dataset, encode_dataset, encode_error_log, timestamp_from_filename,
};
use crate::storage::http_store::HttpObjectStore;
use crate::storage::traits::{ObjectStore, StorageError, StorageResult};
use crate::storage::{ScrapeDataset, ScrapeErrorLog};
use crate::ScrapeError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CSV_CONTENT_TYPE: &str = "text/csv";

/// Which artifact is being persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Dataset,
    ErrorLog,
}

impl ArtifactKind {
    /// Directory (or object prefix) the artifact lives under
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Dataset => "data",
            Self::ErrorLog => "log",
        }
    }
}

/// The tier an artifact landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageTier {
    LocalRoot,
    ObjectStore,
    Fallback,
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalRoot => write!(f, "local directory"),
            Self::ObjectStore => write!(f, "object store"),
            Self::Fallback => write!(f, "fallback directory"),
        }
    }
}

/// Result of a save attempt
///
/// Callers must read `location` rather than assume a tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
    pub location: Option<String>,
    pub tier: Option<StorageTier>,
}

impl SaveOutcome {
    fn saved(tier: StorageTier, location: String) -> Self {
        Self {
            success: true,
            message: format!("Saved to {} at {}", tier, location),
            location: Some(location),
            tier: Some(tier),
        }
    }

    fn exhausted(failures: &[String]) -> Self {
        Self {
            success: false,
            message: failures.join("; "),
            location: None,
            tier: None,
        }
    }
}

/// Writes and reads scrape artifacts through the fallback chain
#[derive(Clone)]
pub struct Persistence {
    local_root: PathBuf,
    fallback_root: PathBuf,
    remote: Option<(Arc<dyn ObjectStore>, String)>,
}

impl Persistence {
    /// Creates a persistence layer with only the two local tiers
    pub fn new(local_root: impl Into<PathBuf>, fallback_root: impl Into<PathBuf>) -> Self {
        Self {
            local_root: local_root.into(),
            fallback_root: fallback_root.into(),
            remote: None,
        }
    }

    /// Creates the chain described by the storage settings
    ///
    /// The object-store tier is enabled only when a bucket is configured.
    pub fn from_settings(settings: &StorageSettings) -> StorageResult<Self> {
        let persistence = Self::new(&settings.local_root, &settings.fallback_root);
        match &settings.bucket {
            Some(bucket) => {
                let store = HttpObjectStore::from_settings(settings)?;
                Ok(persistence.with_object_store(Arc::new(store), bucket.clone()))
            }
            None => Ok(persistence),
        }
    }

    /// Enables the object-store tier
    pub fn with_object_store(mut self, store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        self.remote = Some((store, bucket.into()));
        self
    }

    /// Persists a dataset under `data/`
    pub async fn save_dataset(&self, dataset: &ScrapeDataset, filename: &str) -> SaveOutcome {
        match encode_dataset(dataset) {
            Ok(bytes) => self.save(ArtifactKind::Dataset, filename, bytes).await,
            Err(e) => SaveOutcome::exhausted(&[format!("encoding failed: {}", e)]),
        }
    }

    /// Persists an error log under `log/`
    ///
    /// Returns `None` without writing anything when the log is empty.
    pub async fn save_error_log(&self, log: &ScrapeErrorLog, filename: &str) -> Option<SaveOutcome> {
        if log.is_empty() {
            return None;
        }
        let outcome = match encode_error_log(log) {
            Ok(bytes) => self.save(ArtifactKind::ErrorLog, filename, bytes).await,
            Err(e) => SaveOutcome::exhausted(&[format!("encoding failed: {}", e)]),
        };
        Some(outcome)
    }

    /// Reads a dataset back, searching the tiers in save order
    pub async fn load(&self, filename: &str) -> Result<ScrapeDataset, ScrapeError> {
        let bytes = self.read(ArtifactKind::Dataset, filename).await?;
        let dataset = decode_dataset(&bytes, timestamp_from_filename(filename))?;
        Ok(dataset)
    }

    async fn save(&self, kind: ArtifactKind, filename: &str, bytes: Vec<u8>) -> SaveOutcome {
        let mut failures = Vec::new();

        let local_dir = self.local_root.join(kind.prefix());
        if local_dir.is_dir() {
            match write_file(&local_dir, filename, &bytes).await {
                Ok(path) => return SaveOutcome::saved(StorageTier::LocalRoot, path),
                Err(e) => {
                    tracing::warn!("Local write to {} failed: {}", local_dir.display(), e);
                    failures.push(format!("{}: {}", StorageTier::LocalRoot, e));
                }
            }
        } else {
            tracing::debug!("{} does not exist, skipping local tier", local_dir.display());
        }

        if let Some((store, bucket)) = &self.remote {
            let object = format!("{}/{}", kind.prefix(), filename);
            match put_remote(store.as_ref(), bucket, &object, bytes.clone()).await {
                Ok(()) => {
                    return SaveOutcome::saved(
                        StorageTier::ObjectStore,
                        format!("{}/{}", bucket, object),
                    )
                }
                Err(e) => {
                    tracing::warn!("Object store write of {} failed: {}", object, e);
                    failures.push(format!("{}: {}", StorageTier::ObjectStore, e));
                }
            }
        }

        let fallback_dir = self.fallback_root.join(kind.prefix());
        let written = match tokio::fs::create_dir_all(&fallback_dir).await {
            Ok(()) => write_file(&fallback_dir, filename, &bytes).await,
            Err(e) => Err(StorageError::Io(e)),
        };
        match written {
            Ok(path) => SaveOutcome::saved(StorageTier::Fallback, path),
            Err(e) => {
                tracing::error!("Fallback write to {} failed: {}", fallback_dir.display(), e);
                failures.push(format!("{}: {}", StorageTier::Fallback, e));
                SaveOutcome::exhausted(&failures)
            }
        }
    }

    async fn read(&self, kind: ArtifactKind, filename: &str) -> StorageResult<Vec<u8>> {
        let local_path = self.local_root.join(kind.prefix()).join(filename);
        if local_path.is_file() {
            return Ok(tokio::fs::read(&local_path).await?);
        }

        if let Some((store, bucket)) = &self.remote {
            let object = format!("{}/{}", kind.prefix(), filename);
            match store.get(bucket, &object).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) => tracing::debug!("Object store read of {} failed: {}", object, e),
            }
        }

        let fallback_path = self.fallback_root.join(kind.prefix()).join(filename);
        if fallback_path.is_file() {
            return Ok(tokio::fs::read(&fallback_path).await?);
        }

        Err(StorageError::NotFound(filename.to_string()))
    }
}

async fn write_file(dir: &Path, filename: &str, bytes: &[u8]) -> StorageResult<String> {
    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;
    Ok(path.display().to_string())
}

async fn put_remote(
    store: &dyn ObjectStore,
    bucket: &str,
    object: &str,
    bytes: Vec<u8>,
) -> StorageResult<()> {
    if !store.exists(bucket).await? {
        return Err(StorageError::BucketNotFound(bucket.to_string()));
    }
    store.put(bucket, object, bytes, CSV_CONTENT_TYPE).await
}
