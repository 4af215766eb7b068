//! Storage module for persisting scrape results
//!
//! This module handles everything that outlives a crawl run, including:
//! - The dataset and error-log records handed over by the coordinator
//! - CSV encoding and decoding of those records
//! - The remote object store interface and its HTTP client
//! - The ordered fallback chain (local root, object store, local fallback)

mod csv_io;
mod http_store;
mod persistence;
mod traits;

pub use csv_io::{
    decode_dataset, decode_error_log, encode_dataset, encode_error_log, timestamp_from_filename,
};
pub use http_store::HttpObjectStore;
pub use persistence::{ArtifactKind, Persistence, SaveOutcome, StorageTier};
pub use traits::{ObjectStore, StorageError, StorageResult};

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

/// Timestamp format used in output filenames and the `timestamp` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Formats a timestamp the way it appears in filenames
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp label produced by [`format_timestamp`]
pub fn parse_timestamp(label: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(label.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// One extracted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRow {
    pub key: String,
    pub text: String,
}

/// Text extracted from one seed sitemap in one crawl run
///
/// All rows share the dataset timestamp, which records when the run finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeDataset {
    pub rows: Vec<DatasetRow>,
    pub timestamp: DateTime<Utc>,
}

impl ScrapeDataset {
    /// Creates a dataset, truncating the timestamp to whole seconds
    pub fn new(rows: Vec<DatasetRow>, timestamp: DateTime<Utc>) -> Self {
        Self {
            rows,
            timestamp: timestamp.trunc_subsecs(0),
        }
    }

    pub fn timestamp_label(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One URL that could not be extracted cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRow {
    pub key: String,
    pub error: String,
}

/// Companion diagnostics for a [`ScrapeDataset`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeErrorLog {
    pub rows: Vec<ErrorRow>,
}

impl ScrapeErrorLog {
    pub fn push(&mut self, key: impl Into<String>, error: impl Into<String>) {
        self.rows.push(ErrorRow {
            key: key.into(),
            error: error.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
