//! Page fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building HTTP clients with a browser-like user agent and bounded timeouts
//! - Content-Type probing to route PDFs away from the HTML path
//! - Static HTML text extraction
//! - Headless-browser rendering when the static pass yields too little text
//! - Error classification into per-URL records

use crate::config::{BrowserSettings, Config, CrawlerSettings};
use crate::crawler::extract::{
    assess_static, count_words, extract_visible_text, normalize_plain_text, RenderReason,
    StaticExtraction,
};
use crate::crawler::pdf::{extract_pdf_text, is_pdf_content_type};
use crate::crawler::render::{BrowserGuard, BrowserLauncher, ChromiumLauncher, RenderError};
use crate::{concise_error, PageError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;

/// Strategy that produced a page's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchedVia {
    Static,
    Rendered,
    Pdf,
}

/// Extracted content for one URL
///
/// An empty `text` with an `error` means extraction failed. Non-empty text
/// with an `error` is a usable page that was flagged (e.g. thin content).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub text: String,
    pub fetched_via: FetchedVia,
    pub error: Option<String>,
}

impl PageContent {
    fn extracted(url: &str, text: String, fetched_via: FetchedVia) -> Self {
        Self {
            url: url.to_string(),
            text,
            fetched_via,
            error: None,
        }
    }

    fn failed(url: &str, fetched_via: FetchedVia, error: &PageError) -> Self {
        Self {
            url: url.to_string(),
            text: String::new(),
            fetched_via,
            error: Some(error.to_string()),
        }
    }

    fn with_warning(mut self, warning: String) -> Self {
        self.error = Some(warning);
        self
    }

    /// True when no text could be extracted
    pub fn is_failure(&self) -> bool {
        self.text.is_empty() && self.error.is_some()
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitemap_scraper::config::CrawlerSettings;
/// use sitemap_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerSettings::default()).unwrap();
/// ```
pub fn build_http_client(settings: &CrawlerSettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(settings.request_timeout())
        .connect_timeout(settings.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages one at a time with the tiered extraction strategy
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    browser: Option<Arc<dyn BrowserLauncher>>,
    min_static_words: usize,
    thin_content_words: usize,
    lowercase: bool,
    render_wait: Duration,
    render_budget: Duration,
}

impl PageFetcher {
    /// Creates a fetcher without a browser; see [`with_browser`](Self::with_browser)
    pub fn new(client: Client, crawler: &CrawlerSettings, browser: &BrowserSettings) -> Self {
        Self {
            client,
            browser: None,
            min_static_words: crawler.min_static_words,
            thin_content_words: crawler.thin_content_words,
            lowercase: crawler.lowercase_text,
            render_wait: browser.render_wait(),
            render_budget: browser.render_wait() + crawler.request_timeout(),
        }
    }

    /// Creates a fetcher from configuration, wiring in headless Chromium when enabled
    pub fn from_config(config: &Config, client: Client) -> Self {
        let fetcher = Self::new(client, &config.crawler, &config.browser);
        if config.browser.enabled {
            fetcher.with_browser(Arc::new(ChromiumLauncher::new(
                config.browser.clone(),
                config.crawler.user_agent.clone(),
            )))
        } else {
            fetcher
        }
    }

    /// Sets the launcher used for the rendering fallback
    pub fn with_browser(mut self, launcher: Arc<dyn BrowserLauncher>) -> Self {
        self.browser = Some(launcher);
        self
    }

    /// Fetches a URL and extracts its text
    ///
    /// # Strategy
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Request fails | Failed, `PageError::Request` |
    /// | `Content-Type: application/pdf` | PDF text extraction, never rendered |
    /// | HTTP 2xx, >= threshold words | Static text |
    /// | HTTP 2xx, < threshold words | Render in browser |
    /// | HTTP non-2xx | Render in browser |
    ///
    /// Never returns an error: every failure is recorded on the [`PageContent`].
    pub async fn fetch(&self, url: &str) -> PageContent {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = PageError::Request(concise_error(&e));
                tracing::warn!("Failed to fetch {}: {}", url, error);
                return PageContent::failed(url, FetchedVia::Static, &error);
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if is_pdf_content_type(&content_type) {
            if !status.is_success() {
                let error = PageError::Status(status.as_u16());
                return PageContent::failed(url, FetchedVia::Pdf, &error);
            }
            return self.fetch_pdf(url, response).await;
        }

        let extraction = if status.is_success() {
            match response.text().await {
                Ok(body) => assess_static(
                    extract_visible_text(&body, self.lowercase),
                    self.min_static_words,
                ),
                Err(e) => {
                    let error = PageError::Request(concise_error(&e));
                    tracing::warn!("Failed to read body of {}: {}", url, error);
                    return PageContent::failed(url, FetchedVia::Static, &error);
                }
            }
        } else {
            StaticExtraction::NeedsRender {
                text: String::new(),
                reason: RenderReason::HttpStatus(status.as_u16()),
            }
        };

        match extraction {
            StaticExtraction::Extracted { text } => {
                tracing::debug!("Static extraction for {} ({} words)", url, count_words(&text));
                PageContent::extracted(url, text, FetchedVia::Static)
            }
            StaticExtraction::NeedsRender { text, reason } => {
                tracing::debug!("Rendering {}: {:?}", url, reason);
                self.render_fallback(url, text, reason).await
            }
        }
    }

    async fn fetch_pdf(&self, url: &str, response: Response) -> PageContent {
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = PageError::Request(concise_error(&e));
                return PageContent::failed(url, FetchedVia::Pdf, &error);
            }
        };

        match extract_pdf_text(bytes.to_vec()).await {
            Ok(text) => pdf_content(url, &text, self.lowercase),
            Err(error) => {
                tracing::warn!("Failed to extract PDF {}: {}", url, error);
                PageContent::failed(url, FetchedVia::Pdf, &error)
            }
        }
    }

    async fn render_fallback(
        &self,
        url: &str,
        static_text: String,
        reason: RenderReason,
    ) -> PageContent {
        let Some(launcher) = &self.browser else {
            return match reason {
                RenderReason::TooFewWords(words) if !static_text.is_empty() => {
                    PageContent::extracted(url, static_text, FetchedVia::Static).with_warning(
                        format!("only {} words extracted and rendering is disabled", words),
                    )
                }
                RenderReason::HttpStatus(code) => {
                    PageContent::failed(url, FetchedVia::Static, &PageError::Status(code))
                }
                RenderReason::TooFewWords(_) => PageContent::failed(
                    url,
                    FetchedVia::Static,
                    &PageError::Render(RenderError::Disabled),
                ),
            };
        };

        match self.render(launcher.as_ref(), url).await {
            Ok(html) => {
                let text = extract_visible_text(&html, self.lowercase);
                let words = count_words(&text);
                let content = PageContent::extracted(url, text, FetchedVia::Rendered);
                if words < self.thin_content_words {
                    tracing::warn!("Thin content for {}: {} words after rendering", url, words);
                    content.with_warning(format!("thin content: {} words after rendering", words))
                } else {
                    content
                }
            }
            Err(e) => {
                let error = PageError::Render(e);
                tracing::warn!("Failed to render {}: {}", url, error);
                PageContent::failed(url, FetchedVia::Rendered, &error)
            }
        }
    }

    /// Renders a URL in a fresh browser session
    ///
    /// The session is closed on every path out of this function; if the
    /// returned future is dropped, the guard's `Drop` closes it instead.
    async fn render(&self, launcher: &dyn BrowserLauncher, url: &str) -> Result<String, RenderError> {
        let session = launcher.launch().await?;
        let mut guard = BrowserGuard::new(session, url);

        let rendered = match tokio::time::timeout(self.render_budget, guard.render(self.render_wait)).await
        {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout(self.render_budget)),
        };

        // A close failure does not invalidate content that was already read.
        let _ = guard.close().await;
        rendered
    }
}

/// Builds the page record for a parsed PDF
///
/// A document without a text layer (scanned pages) is recorded with a warning
/// and no text, so it lands in the error log rather than as an empty row.
fn pdf_content(url: &str, raw_text: &str, lowercase: bool) -> PageContent {
    let text = normalize_plain_text(raw_text, lowercase);
    if text.is_empty() {
        tracing::warn!("No extractable text in PDF {}", url);
        return PageContent::extracted(url, text, FetchedVia::Pdf)
            .with_warning("no extractable text in PDF".to_string());
    }
    PageContent::extracted(url, text, FetchedVia::Pdf)
}
