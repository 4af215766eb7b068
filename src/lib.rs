//! Sitemap Scraper: a sitemap-driven page text harvester
//!
//! This crate resolves a site's (possibly nested) sitemap, fetches every page it
//! lists with a tiered extraction strategy (PDF, static HTML, headless browser),
//! and persists the extracted text as CSV through a fallback storage chain.

pub mod config;
pub mod crawler;
pub mod output;
pub mod seeds;
pub mod sitemap;
pub mod storage;
pub mod url;

use std::error::Error as StdError;
use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Could not persist {filename} to any storage tier: {message}")]
    PersistenceExhausted { filename: String, message: String },

    #[error("Seed list error: {0}")]
    Seeds(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Structural failures while resolving a sitemap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SitemapError {
    #[error("Failed to fetch sitemap {url}: {message}")]
    Request { url: String, message: String },

    #[error("Sitemap {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("No <loc> entries found in {url}")]
    NoUrls { url: String },

    #[error("{nested} nested sitemap(s) in {url} yielded no page URLs")]
    NestedEmpty { url: String, nested: usize },
}

/// Per-URL fetch and extraction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] crawler::RenderError),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Reduces a low-level error chain to a short, human-readable message.
///
/// Network errors from the HTTP stack nest several layers deep and end in
/// OS-level noise such as `(os error 111)`. This keeps the innermost cause,
/// strips that suffix, and names timeouts and connection failures explicitly.
pub fn concise_error(err: &(dyn StdError + 'static)) -> String {
    if let Some(req) = err.downcast_ref::<reqwest::Error>() {
        if req.is_timeout() {
            return "request timed out".to_string();
        }
        if req.is_connect() {
            return format!("connection failed: {}", root_cause_message(err));
        }
    }
    root_cause_message(err)
}

fn root_cause_message(err: &(dyn StdError + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    strip_os_suffix(&current.to_string())
}

fn strip_os_suffix(message: &str) -> String {
    let trimmed = match message.find(" (os error") {
        Some(idx) => &message[..idx],
        None => message,
    };
    trimmed.trim().to_string()
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlEvent, FetchedVia, PageContent, PageFetcher, SeedReport};
pub use sitemap::{ResolutionStatus, SitemapResolution, SitemapResolver};
pub use storage::{Persistence, SaveOutcome, ScrapeDataset, ScrapeErrorLog};
