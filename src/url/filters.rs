use url::Url;

/// Extensions of image resources that sitemaps sometimes list alongside pages
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".svg"];

/// Returns the lowercased part of the URL that carries the file extension.
///
/// Absolute URLs are judged on their path so that `?v=2` or `#top` cannot hide
/// an extension; anything that does not parse is judged as a whole.
fn extension_bearing_part(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or(trimmed)
            .to_lowercase(),
    }
}

/// Checks whether a URL points at an image resource
///
/// # Examples
///
/// ```
/// use sitemap_scraper::url::is_image_url;
///
/// assert!(is_image_url("https://example.com/logo.png"));
/// assert!(is_image_url("https://example.com/Photo.JPEG?w=300"));
/// assert!(!is_image_url("https://example.com/png-guide"));
/// ```
pub fn is_image_url(url: &str) -> bool {
    let part = extension_bearing_part(url);
    IMAGE_EXTENSIONS.iter().any(|ext| part.ends_with(ext))
}

/// Checks whether a URL points at another sitemap document
///
/// The whole entry must end in `.xml`; a paginated `sitemap.xml?page=2` is
/// treated as a page.
pub fn is_sitemap_url(url: &str) -> bool {
    url.trim().to_ascii_lowercase().ends_with(".xml")
}
