//! Sitemap resolution
//!
//! This module turns a seed sitemap URL into the ordered, deduplicated list of
//! page URLs it describes:
//! - `<loc>` extraction from sitemap XML (any namespace prefix)
//! - one level of nested sitemap expansion
//! - image filtering and first-seen deduplication
//! - a structured diagnostic for every outcome

mod parser;
mod resolver;

pub use parser::parse_locs;
pub use resolver::{dedup_preserving_order, SitemapResolver};

use crate::SitemapError;

/// Outcome of resolving one seed sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    Success,
    Failure,
}

/// Result of resolving one seed sitemap
///
/// A `Failure` always carries an empty URL list. `is_nested` is set only when
/// the seed document referenced at least one other sitemap (`.xml` entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapResolution {
    pub status: ResolutionStatus,
    /// Unique page URLs in discovery order
    pub urls: Vec<String>,
    pub is_nested: bool,
    /// Failure reason, or a summary of what was resolved
    pub message: String,
}

impl SitemapResolution {
    pub(crate) fn success(urls: Vec<String>, is_nested: bool, message: String) -> Self {
        Self {
            status: ResolutionStatus::Success,
            urls,
            is_nested,
            message,
        }
    }

    pub(crate) fn failure(error: &SitemapError, is_nested: bool) -> Self {
        Self {
            status: ResolutionStatus::Failure,
            urls: Vec::new(),
            is_nested,
            message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResolutionStatus::Success
    }
}
