//! URL handling module
//!
//! This module provides domain extraction, sitemap entry classification,
//! relative-path resolution against a seed sitemap, and output file naming.

mod domain;
mod filters;
mod resolve;

// Re-export main functions
pub use domain::{extract_domain, output_filename, seed_for_site, site_host};
pub use filters::{is_image_url, is_sitemap_url, IMAGE_EXTENSIONS};
pub use resolve::resolve_against_seed;

/// How a `<loc>` entry discovered in a sitemap is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// An ordinary page to fetch
    Page,
    /// Another sitemap document to expand
    NestedSitemap,
    /// An image resource, never fetched
    Image,
}

/// Classifies a sitemap entry
///
/// Images are checked first so that an entry is never both skipped and expanded.
///
/// # Examples
///
/// ```
/// use sitemap_scraper::url::{classify_entry, EntryKind};
///
/// assert_eq!(classify_entry("https://example.com/about"), EntryKind::Page);
/// assert_eq!(classify_entry("https://example.com/post-sitemap.xml"), EntryKind::NestedSitemap);
/// assert_eq!(classify_entry("https://example.com/logo.PNG"), EntryKind::Image);
/// ```
pub fn classify_entry(url: &str) -> EntryKind {
    if is_image_url(url) {
        EntryKind::Image
    } else if is_sitemap_url(url) {
        EntryKind::NestedSitemap
    } else {
        EntryKind::Page
    }
}
