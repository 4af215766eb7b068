use crate::sitemap::parser::parse_locs;
use crate::sitemap::SitemapResolution;
use crate::url::{classify_entry, resolve_against_seed, EntryKind};
use crate::{concise_error, SitemapError};
use reqwest::Client;
use std::collections::HashSet;

/// Resolves seed sitemaps into page URL lists
///
/// The resolver holds no state between calls beyond the HTTP client, so
/// resolving the same static sitemap twice yields the same list.
#[derive(Debug, Clone)]
pub struct SitemapResolver {
    client: Client,
}

impl SitemapResolver {
    /// Creates a resolver around a preconfigured client
    ///
    /// The client carries the User-Agent header and request timeouts; see
    /// [`crate::crawler::build_http_client`].
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Resolves a seed sitemap
    ///
    /// # Resolution Rules
    ///
    /// | Entry | Action |
    /// |-------|--------|
    /// | image (`.png`, `.jpg`, ...) | skipped |
    /// | `*.xml` | fetched as a nested sitemap; its entries appended (images skipped) |
    /// | anything else | appended as a page URL, `/path` joined to the seed's origin |
    ///
    /// A seed that cannot be fetched, returns a non-success status, or lists no
    /// `<loc>` entries yields a `Failure`. Failed nested fetches are logged and
    /// skipped. If nested sitemaps were referenced but nothing survived, the
    /// resolution is a `Failure` too.
    pub async fn resolve(&self, seed: &str) -> SitemapResolution {
        let seed = seed.trim();
        tracing::debug!("Resolving sitemap {}", seed);

        let entries = match self.fetch_locs(seed).await {
            Ok(entries) if entries.is_empty() => {
                return SitemapResolution::failure(
                    &SitemapError::NoUrls {
                        url: seed.to_string(),
                    },
                    false,
                );
            }
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("{}", e);
                return SitemapResolution::failure(&e, false);
            }
        };

        let mut collected = Vec::with_capacity(entries.len());
        let mut nested_total = 0usize;
        let mut nested_ok = 0usize;

        for entry in entries {
            match classify_entry(&entry) {
                EntryKind::Image => {
                    tracing::trace!("Skipping image entry {}", entry);
                }
                EntryKind::NestedSitemap => {
                    nested_total += 1;
                    let target = resolve_against_seed(&entry, seed).unwrap_or(entry);
                    match self.fetch_locs(&target).await {
                        Ok(nested) => {
                            nested_ok += 1;
                            tracing::debug!("Nested sitemap {} listed {} entries", target, nested.len());
                            collected.extend(
                                nested
                                    .into_iter()
                                    .filter(|u| classify_entry(u) != EntryKind::Image)
                                    .map(|u| absolutize(u, seed)),
                            );
                        }
                        Err(e) => {
                            tracing::warn!("Skipping nested sitemap: {}", e);
                        }
                    }
                }
                EntryKind::Page => collected.push(absolutize(entry, seed)),
            }
        }

        let urls = dedup_preserving_order(collected);
        let is_nested = nested_total > 0;

        if urls.is_empty() && is_nested {
            let err = SitemapError::NestedEmpty {
                url: seed.to_string(),
                nested: nested_total,
            };
            tracing::warn!("{}", err);
            return SitemapResolution::failure(&err, true);
        }

        let message = if is_nested {
            format!(
                "Processed {} of {} nested sitemaps, {} page URLs",
                nested_ok,
                nested_total,
                urls.len()
            )
        } else {
            format!("Single sitemap, {} page URLs", urls.len())
        };
        tracing::info!("{}: {}", seed, message);

        SitemapResolution::success(urls, is_nested, message)
    }

    /// Fetches one sitemap document and extracts its `<loc>` entries
    async fn fetch_locs(&self, url: &str) -> Result<Vec<String>, SitemapError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SitemapError::Request {
                url: url.to_string(),
                message: concise_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitemapError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| SitemapError::Request {
            url: url.to_string(),
            message: concise_error(&e),
        })?;

        Ok(parse_locs(&body))
    }
}

/// Joins a root-relative entry to the seed so it dedups against its absolute form
fn absolutize(entry: String, seed: &str) -> String {
    match resolve_against_seed(&entry, seed) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Keeping unresolvable entry {} as listed: {}", entry, e);
            entry
        }
    }
}

/// Removes duplicates by exact match after trimming, keeping first occurrences
///
/// ```
/// use sitemap_scraper::sitemap::dedup_preserving_order;
///
/// let urls = vec![
///     "https://example.com/b".to_string(),
///     " https://example.com/a ".to_string(),
///     "https://example.com/b".to_string(),
///     "https://example.com/a".to_string(),
/// ];
/// assert_eq!(
///     dedup_preserving_order(urls),
///     vec!["https://example.com/b", "https://example.com/a"]
/// );
/// ```
pub fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    let mut unique = Vec::with_capacity(urls.len());

    for url in urls {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            unique.push(trimmed.to_string());
        }
    }

    unique
}
