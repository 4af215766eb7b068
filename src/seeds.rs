//! Seed sitemap lists
//!
//! Seeds are read from a CSV file with a `sitemap` column; other columns are
//! ignored.

use crate::ScrapeError;
use std::path::Path;

/// Name of the column holding seed sitemap URLs
pub const SITEMAP_COLUMN: &str = "sitemap";

/// Loads seed sitemap URLs from a CSV file, in file order
///
/// Blank cells are skipped.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The seed URLs (possibly empty if every cell is blank)
/// * `Err(ScrapeError::Seeds)` - The file is missing, empty, or has no `sitemap` column
pub fn load_seed_sitemaps(path: &Path) -> Result<Vec<String>, ScrapeError> {
    if !path.exists() {
        return Err(ScrapeError::Seeds(format!(
            "seed file {} does not exist",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ScrapeError::Seeds(format!(
            "seed file {} is empty",
            path.display()
        )));
    }

    let column = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(SITEMAP_COLUMN))
        .ok_or_else(|| {
            ScrapeError::Seeds(format!(
                "seed file {} has no '{}' column",
                path.display(),
                SITEMAP_COLUMN
            ))
        })?;

    let mut seeds = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(seed) = record.get(column).filter(|s| !s.is_empty()) {
            seeds.push(seed.to_string());
        }
    }

    tracing::debug!("Loaded {} seed sitemap(s) from {}", seeds.len(), path.display());
    Ok(seeds)
}
