//! Sitemap Scraper main entry point
//!
//! This is the command-line interface for the sitemap-driven page text scraper.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use sitemap_scraper::config::{load_config_with_hash, validate, Config};
use sitemap_scraper::crawler::{Coordinator, CrawlEvent, SeedReport};
use sitemap_scraper::output::{aggregate_statistics, print_seed_reports, print_statistics};
use sitemap_scraper::seeds::load_seed_sitemaps;
use sitemap_scraper::url::seed_for_site;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sitemap Scraper: harvests page text from a site's sitemap
///
/// Every page listed in the sitemap (nested sitemaps included) is fetched one
/// at a time; PDFs are parsed, HTML is stripped to visible text, and pages that
/// need JavaScript are rendered in headless Chromium. One CSV per sitemap is
/// written to the first available storage location.
#[derive(Parser, Debug)]
#[command(name = "sitemap-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrapes page text from the URLs in a sitemap", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["seeds", "site", "sitemap"])))]
struct Cli {
    /// CSV file with a `sitemap` column of seed sitemap URLs
    #[arg(long, value_name = "CSV")]
    seeds: Option<PathBuf>,

    /// Crawl a single site through its /sitemap.xml
    #[arg(long, value_name = "URL")]
    site: Option<String>,

    /// Crawl a single sitemap URL
    #[arg(long, value_name = "URL")]
    sitemap: Option<String>,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without making requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;
    let seeds = collect_seeds(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config, &seeds);
        return Ok(());
    }

    handle_crawl(config, &seeds, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_scraper=info,warn"),
            1 => EnvFilter::new("sitemap_scraper=debug,info"),
            2 => EnvFilter::new("sitemap_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load_configuration(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            let config = Config::default();
            validate(&config).context("default configuration is invalid")?;
            tracing::debug!("No configuration file given, using defaults");
            Ok(config)
        }
    }
}

fn collect_seeds(cli: &Cli) -> Result<Vec<String>> {
    if let Some(path) = &cli.seeds {
        let seeds = load_seed_sitemaps(path)?;
        tracing::info!("Loaded {} seed sitemap(s) from {}", seeds.len(), path.display());
        return Ok(seeds);
    }
    if let Some(site) = &cli.site {
        return Ok(vec![seed_for_site(site)?]);
    }
    if let Some(sitemap) = &cli.sitemap {
        return Ok(vec![sitemap.clone()]);
    }
    anyhow::bail!("one of --seeds, --site or --sitemap is required")
}

/// Handles the --dry-run mode: shows configuration and seeds
fn handle_dry_run(config: &Config, seeds: &[String]) {
    println!("=== Sitemap Scraper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  User agent: {}", config.crawler.user_agent);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Render threshold: {} words", config.crawler.min_static_words);
    match config.crawler.max_pages_per_site {
        Some(max) => println!("  Max pages per site: {}", max),
        None => println!("  Max pages per site: unlimited"),
    }

    println!("\nBrowser:");
    println!("  Enabled: {}", config.browser.enabled);
    println!("  Headless: {}", config.browser.headless);
    println!("  Render wait: {}s", config.browser.render_wait_secs);

    println!("\nStorage:");
    println!("  Local root: {}", config.storage.local_root.display());
    match &config.storage.bucket {
        Some(bucket) => println!("  Bucket: {} via {}", bucket, config.storage.endpoint),
        None => println!("  Bucket: none"),
    }
    println!("  Fallback root: {}", config.storage.fallback_root.display());

    println!("\nSeed Sitemaps ({}):", seeds.len());
    for seed in seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, seeds: &[String], quiet: bool) -> Result<()> {
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page and saving");
            ctrl_c.cancel();
        }
    });

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<CrawlEvent>();
    let coordinator = Coordinator::from_config(config)?
        .with_progress(tx)
        .with_cancellation(cancel);

    // Progress events are already logged; the channel only counts failures here.
    let listener = tokio::spawn(async move {
        let mut failed = 0usize;
        while let Some(event) = rx.recv().await {
            if matches!(event, CrawlEvent::PageFailed { .. }) {
                failed += 1;
            }
        }
        failed
    });

    let result = coordinator.crawl(seeds).await;
    drop(coordinator);
    let failed = listener.await.unwrap_or_default();

    let reports: Vec<SeedReport> = match result {
        Ok(reports) => reports,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Crawl completed: {} of {} sitemap(s) produced datasets, {} page failure(s)",
        reports.len(),
        seeds.len(),
        failed
    );

    if !quiet {
        print_seed_reports(&reports);
        print_statistics(&aggregate_statistics(&reports));
    }

    Ok(())
}
