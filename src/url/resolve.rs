use crate::UrlError;
use url::Url;

/// Resolves a sitemap entry against the seed sitemap it came from
///
/// Absolute URLs are returned unchanged. Root-relative paths (`/about`) are
/// joined to the seed's scheme, host and port. Anything else is returned as-is
/// and left for the fetcher to reject.
///
/// # Examples
///
/// ```
/// use sitemap_scraper::url::resolve_against_seed;
///
/// let url = resolve_against_seed("/team", "https://example.com/sitemaps/main.xml").unwrap();
/// assert_eq!(url, "https://example.com/team");
///
/// let url = resolve_against_seed("https://other.com/x", "https://example.com/sitemap.xml").unwrap();
/// assert_eq!(url, "https://other.com/x");
/// ```
pub fn resolve_against_seed(candidate: &str, seed: &str) -> Result<String, UrlError> {
    let candidate = candidate.trim();
    if !candidate.starts_with('/') || candidate.starts_with("//") {
        return Ok(candidate.to_string());
    }

    let seed_url =
        Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;
    if seed_url.host_str().is_none() {
        return Err(UrlError::MissingHost(seed.to_string()));
    }

    let origin = seed_url.origin().ascii_serialization();
    Ok(format!("{}{}", origin, candidate))
}
