//! CSV encoding of datasets and error logs
//!
//! Datasets are written with the columns `key,text,timestamp`; error logs with
//! `key,error`. The header is always written, so an empty dataset is still a
//! valid file.

use crate::storage::traits::{StorageError, StorageResult};
use crate::storage::{
    format_timestamp, parse_timestamp, DatasetRow, ErrorRow, ScrapeDataset, ScrapeErrorLog,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DATASET_HEADER: [&str; 3] = ["key", "text", "timestamp"];
const ERROR_LOG_HEADER: [&str; 2] = ["key", "error"];

#[derive(Debug, Serialize, Deserialize)]
struct DatasetRecord {
    key: String,
    text: String,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorRecord {
    key: String,
    error: String,
}

fn malformed(err: csv::Error) -> StorageError {
    StorageError::Malformed(err.to_string())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> StorageResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))
}

/// Encodes a dataset as CSV
pub fn encode_dataset(dataset: &ScrapeDataset) -> StorageResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(DATASET_HEADER).map_err(malformed)?;

    let label = format_timestamp(&dataset.timestamp);
    for row in &dataset.rows {
        writer
            .serialize(DatasetRecord {
                key: row.key.clone(),
                text: row.text.clone(),
                timestamp: Some(label.clone()),
            })
            .map_err(malformed)?;
    }

    finish(writer)
}

/// Encodes an error log as CSV
pub fn encode_error_log(log: &ScrapeErrorLog) -> StorageResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(ERROR_LOG_HEADER).map_err(malformed)?;

    for row in &log.rows {
        writer
            .serialize(ErrorRecord {
                key: row.key.clone(),
                error: row.error.clone(),
            })
            .map_err(malformed)?;
    }

    finish(writer)
}

/// Decodes a dataset
///
/// The dataset timestamp is taken from the `timestamp` column when present.
/// Files without one fall back to `fallback`, usually derived from the
/// filename with [`timestamp_from_filename`].
pub fn decode_dataset(
    bytes: &[u8],
    fallback: Option<DateTime<Utc>>,
) -> StorageResult<ScrapeDataset> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();
    let mut timestamp = None;

    for record in reader.deserialize::<DatasetRecord>() {
        let record = record.map_err(malformed)?;
        if timestamp.is_none() {
            timestamp = record.timestamp.as_deref().and_then(parse_timestamp);
        }
        rows.push(DatasetRow {
            key: record.key,
            text: record.text,
        });
    }

    let timestamp = timestamp.or(fallback).ok_or_else(|| {
        StorageError::Malformed("dataset has no timestamp column or filename stamp".to_string())
    })?;

    Ok(ScrapeDataset::new(rows, timestamp))
}

/// Decodes an error log
pub fn decode_error_log(bytes: &[u8]) -> StorageResult<ScrapeErrorLog> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut log = ScrapeErrorLog::default();

    for record in reader.deserialize::<ErrorRecord>() {
        let record = record.map_err(malformed)?;
        log.rows.push(ErrorRow {
            key: record.key,
            error: record.error,
        });
    }

    Ok(log)
}

/// Recovers the timestamp from a `{host}_{timestamp}.csv` filename
pub fn timestamp_from_filename(filename: &str) -> Option<DateTime<Utc>> {
    let stem = filename.strip_suffix(".csv").unwrap_or(filename);
    let (_, label) = stem.rsplit_once('_')?;
    parse_timestamp(label)
}
