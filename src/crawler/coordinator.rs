//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the components together:
//! - Resolving each seed sitemap into page URLs
//! - Fetching pages strictly one at a time, in discovery order
//! - Accumulating text rows and error rows
//! - Handing the finished dataset to the persistence chain
//! - Reporting progress and honouring cancellation

use crate::config::Config;
use crate::crawler::events::CrawlEvent;
use crate::crawler::fetcher::{build_http_client, PageFetcher};
use crate::output::CrawlStatistics;
use crate::sitemap::SitemapResolver;
use crate::storage::{DatasetRow, Persistence, SaveOutcome, ScrapeDataset, ScrapeErrorLog};
use crate::url::{output_filename, resolve_against_seed, seed_for_site};
use crate::ScrapeError;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Everything a crawl produced for one seed sitemap
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub seed: String,
    pub filename: String,
    pub dataset: ScrapeDataset,
    pub error_log: ScrapeErrorLog,
    /// Where the dataset landed
    pub saved: SaveOutcome,
    /// Where the error log landed; `None` when there were no errors
    pub log_saved: Option<SaveOutcome>,
    pub stats: CrawlStatistics,
    /// True when cancellation cut this seed short
    pub cancelled: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    resolver: SitemapResolver,
    fetcher: PageFetcher,
    persistence: Persistence,
    progress: Option<UnboundedSender<CrawlEvent>>,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Creates a coordinator from its components
    pub fn new(
        config: Config,
        resolver: SitemapResolver,
        fetcher: PageFetcher,
        persistence: Persistence,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            fetcher,
            persistence,
            progress: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a coordinator with production components built from `config`
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(ScrapeError)` - The HTTP client or storage client could not be built
    pub fn from_config(config: Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.crawler)?;
        let resolver = SitemapResolver::new(client.clone());
        let fetcher = PageFetcher::from_config(&config, client);
        let persistence = Persistence::from_settings(&config.storage)?;
        Ok(Self::new(config, resolver, fetcher, persistence))
    }

    /// Sends every [`CrawlEvent`] to `sender` as well as to the log
    pub fn with_progress(mut self, sender: UnboundedSender<CrawlEvent>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Uses `token` to stop the crawl between (or during) page fetches
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls every seed sitemap in order
    ///
    /// Seeds that resolve to no pages are skipped and produce no report. Once
    /// cancelled, the seed in progress is persisted and the rest are skipped.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SeedReport>)` - One report per seed that produced pages
    /// * `Err(ScrapeError)` - A dataset could not be persisted to any tier
    pub async fn crawl(&self, seeds: &[String]) -> Result<Vec<SeedReport>, ScrapeError> {
        let mut reports = Vec::new();

        for (i, seed) in seeds.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::info!(
                    "Skipping {} remaining sitemap(s) after cancellation",
                    seeds.len() - i
                );
                break;
            }

            self.emit(CrawlEvent::SeedStarted {
                seed: seed.clone(),
                index: i + 1,
                total: seeds.len(),
            });

            if let Some(report) = self.crawl_seed(seed).await? {
                reports.push(report);
            }
        }

        Ok(reports)
    }

    /// Crawls a site through its root `/sitemap.xml`
    pub async fn crawl_site(&self, site: &str) -> Result<Option<SeedReport>, ScrapeError> {
        let seed = seed_for_site(site)?;
        self.crawl_seed(&seed).await
    }

    /// Crawls a single seed sitemap
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SeedReport))` - Pages were fetched and the dataset persisted
    /// * `Ok(None)` - The sitemap yielded no pages, nothing was persisted
    /// * `Err(ScrapeError)` - Persistence was exhausted
    pub async fn crawl_seed(&self, seed: &str) -> Result<Option<SeedReport>, ScrapeError> {
        let resolution = self.resolver.resolve(seed).await;
        if !resolution.is_success() || resolution.urls.is_empty() {
            self.emit(CrawlEvent::NoPages {
                seed: seed.to_string(),
                reason: resolution.message,
            });
            return Ok(None);
        }

        let mut urls = resolution.urls;
        if let Some(max) = self.config.crawler.max_pages_per_site {
            if urls.len() > max {
                tracing::info!("Limiting {} to the first {} of {} pages", seed, max, urls.len());
                urls.truncate(max);
            }
        }

        let total = urls.len();
        self.emit(CrawlEvent::PagesFound {
            seed: seed.to_string(),
            count: total,
            nested: resolution.is_nested,
        });

        let mut rows = Vec::with_capacity(total);
        let mut error_log = ScrapeErrorLog::default();
        let mut stats = CrawlStatistics::default();
        let mut fetched = 0;
        let mut cancelled = false;

        for (i, raw) in urls.iter().enumerate() {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let url = match resolve_against_seed(raw, seed) {
                Ok(url) => url,
                Err(e) => {
                    stats.record_unfetchable();
                    error_log.push(raw.as_str(), e.to_string());
                    self.emit(CrawlEvent::PageFailed {
                        url: raw.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            self.emit(CrawlEvent::Fetching {
                index: i + 1,
                total,
                url: url.clone(),
            });

            // Dropping the fetch future on cancellation releases any browser it holds.
            let page = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                page = self.fetcher.fetch(&url) => Some(page),
            };
            let Some(page) = page else {
                cancelled = true;
                break;
            };

            fetched += 1;
            stats.record(&page);

            if let Some(error) = &page.error {
                error_log.push(page.url.as_str(), error.as_str());
                if page.is_failure() {
                    self.emit(CrawlEvent::PageFailed {
                        url: page.url.clone(),
                        error: error.clone(),
                    });
                }
            }

            if !page.is_failure() {
                rows.push(DatasetRow {
                    key: page.url,
                    text: page.text,
                });
            }
        }

        if cancelled {
            self.emit(CrawlEvent::Cancelled {
                seed: seed.to_string(),
                fetched,
                total,
            });
        }

        let dataset = ScrapeDataset::new(rows, Utc::now());
        let filename = output_filename(seed, &dataset.timestamp_label())?;

        let saved = self.persistence.save_dataset(&dataset, &filename).await;
        if !saved.success {
            tracing::error!("Failed to persist {}: {}", filename, saved.message);
            return Err(ScrapeError::PersistenceExhausted {
                filename,
                message: saved.message,
            });
        }
        self.emit(CrawlEvent::Saved {
            seed: seed.to_string(),
            filename: filename.clone(),
            location: saved.location.clone().unwrap_or_default(),
        });

        let log_saved = self.persistence.save_error_log(&error_log, &filename).await;
        match &log_saved {
            Some(outcome) if outcome.success => {
                tracing::info!("Error log for {}: {}", seed, outcome.message)
            }
            Some(outcome) => {
                tracing::warn!("Could not persist error log for {}: {}", seed, outcome.message)
            }
            None => tracing::debug!("No errors for {}", seed),
        }

        Ok(Some(SeedReport {
            seed: seed.to_string(),
            filename,
            dataset,
            error_log,
            saved,
            log_saved,
            stats,
            cancelled,
        }))
    }

    fn emit(&self, event: CrawlEvent) {
        match &event {
            CrawlEvent::NoPages { reason, .. } => tracing::warn!("{} ({})", event, reason),
            CrawlEvent::PageFailed { .. } | CrawlEvent::Cancelled { .. } => {
                tracing::warn!("{}", event)
            }
            _ => tracing::info!("{}", event),
        }

        if let Some(sender) = &self.progress {
            // A dropped receiver only means nobody is listening any more.
            let _ = sender.send(event);
        }
    }
}
