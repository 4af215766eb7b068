use crate::UrlError;
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_scraper::url::extract_domain;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses a seed URL and returns its lowercased host
pub fn site_host(seed: &str) -> Result<String, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;
    extract_domain(&url).ok_or_else(|| UrlError::MissingHost(seed.to_string()))
}

/// Builds the dataset filename for a seed: `{host}_{timestamp}.csv`
///
/// ```
/// use sitemap_scraper::url::output_filename;
///
/// let name = output_filename("https://www.example.com/sitemap.xml", "2024-01-31T09-05-00").unwrap();
/// assert_eq!(name, "www.example.com_2024-01-31T09-05-00.csv");
/// ```
pub fn output_filename(seed: &str, timestamp: &str) -> Result<String, UrlError> {
    Ok(format!("{}_{}.csv", site_host(seed)?, timestamp))
}

/// Derives the conventional sitemap location for a site
///
/// Bare hosts (`example.com`) are assumed to be served over HTTPS.
pub fn seed_for_site(site: &str) -> Result<String, UrlError> {
    let site = site.trim();
    let with_scheme = if site.contains("://") {
        site.to_string()
    } else {
        format!("https://{}", site)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", site, e)))?;
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(site.to_string()));
    }

    let sitemap = url
        .join("/sitemap.xml")
        .map_err(|e| UrlError::Parse(format!("{}: {}", site, e)))?;
    Ok(sitemap.to_string())
}
