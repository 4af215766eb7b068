//! Output module for crawl summaries
//!
//! This module handles:
//! - Recording crawl statistics
//! - Printing per-seed and overall summaries for the CLI

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};

use crate::crawler::SeedReport;

/// Combines the statistics of every seed report
pub fn aggregate_statistics(reports: &[SeedReport]) -> CrawlStatistics {
    let mut total = CrawlStatistics::default();
    for report in reports {
        total.merge(&report.stats);
    }
    total
}

/// Prints one line per seed naming where its artifacts landed
pub fn print_seed_reports(reports: &[SeedReport]) {
    if reports.is_empty() {
        println!("No sitemap produced any pages.");
        return;
    }

    println!("=== Saved Datasets ===\n");
    for report in reports {
        let status = if report.cancelled { " (cancelled)" } else { "" };
        println!(
            "{}{}: {} rows, {}",
            report.seed,
            status,
            report.dataset.len(),
            report.saved.message
        );
        if let Some(log) = &report.log_saved {
            println!("  {} errors: {}", report.error_log.len(), log.message);
        }
    }
    println!();
}
