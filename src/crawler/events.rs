//! Progress events emitted during a crawl

use std::fmt;

/// A progress notification
///
/// Every event is logged; when a progress channel is attached to the
/// [`Coordinator`](crate::crawler::Coordinator) it is also sent there, which
/// lets a caller stream partial progress while a long crawl runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A seed sitemap is about to be resolved
    SeedStarted {
        seed: String,
        index: usize,
        total: usize,
    },
    /// Resolution produced page URLs
    PagesFound {
        seed: String,
        count: usize,
        nested: bool,
    },
    /// Resolution failed or produced nothing; the seed is skipped
    NoPages { seed: String, reason: String },
    /// A page is about to be fetched
    Fetching {
        index: usize,
        total: usize,
        url: String,
    },
    /// A page could not be extracted
    PageFailed { url: String, error: String },
    /// A dataset was persisted
    Saved {
        seed: String,
        filename: String,
        location: String,
    },
    /// The crawl was cancelled while processing a seed
    Cancelled {
        seed: String,
        fetched: usize,
        total: usize,
    },
}

impl fmt::Display for CrawlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedStarted { seed, index, total } => {
                write!(f, "Sitemap {} of {}: {}", index, total, seed)
            }
            Self::PagesFound {
                seed,
                count,
                nested,
            } => {
                if *nested {
                    write!(f, "{} pages found in {} (nested)", count, seed)
                } else {
                    write!(f, "{} pages found in {}", count, seed)
                }
            }
            Self::NoPages { seed, .. } => write!(f, "0 pages found in {}", seed),
            Self::Fetching { index, total, url } => write!(f, "{} of {}: {}", index, total, url),
            Self::PageFailed { url, error } => write!(f, "Failed {}: {}", url, error),
            Self::Saved {
                filename, location, ..
            } => write!(f, "Saved {} to {}", filename, location),
            Self::Cancelled {
                seed,
                fetched,
                total,
            } => write!(
                f,
                "Cancelled after {} of {} pages of {}",
                fetched, total, seed
            ),
        }
    }
}
