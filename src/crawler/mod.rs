//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - Visible-text extraction from static HTML
//! - PDF text extraction
//! - Headless-browser rendering behind a guaranteed-release guard
//! - The tiered page fetcher
//! - Overall crawl coordination and progress events

mod coordinator;
mod events;
mod extract;
mod fetcher;
mod pdf;
mod render;

pub use coordinator::{Coordinator, SeedReport};
pub use events::CrawlEvent;
pub use extract::{
    assess_static, count_words, extract_visible_text, normalize_plain_text, RenderReason,
    StaticExtraction,
};
pub use fetcher::{build_http_client, FetchedVia, PageContent, PageFetcher};
pub use pdf::{extract_pdf_text, is_pdf_content_type};
pub use render::{BrowserGuard, BrowserLauncher, BrowserSession, ChromiumLauncher, RenderError};

use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete crawl operation over a list of seed sitemaps
///
/// This is the main entry point for a one-shot crawl. It will:
/// 1. Build the HTTP client, browser launcher and storage chain
/// 2. Resolve each seed sitemap
/// 3. Fetch every page sequentially
/// 4. Persist one dataset (and error log) per seed
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `seeds` - Seed sitemap URLs
///
/// # Returns
///
/// * `Ok(Vec<SeedReport>)` - Crawl completed
/// * `Err(ScrapeError)` - Setup failed or persistence was exhausted
pub async fn crawl(config: Config, seeds: &[String]) -> Result<Vec<SeedReport>, ScrapeError> {
    Coordinator::from_config(config)?.crawl(seeds).await
}
