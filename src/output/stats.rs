//! Crawl statistics
//!
//! This module tallies fetch outcomes while a crawl runs and prints a
//! summary at the end.

use crate::crawler::{FetchedVia, PageContent};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of URLs a fetch was attempted for
    pub pages_attempted: u64,

    /// Pages with usable text, by extraction strategy
    pub pages_by_strategy: HashMap<FetchedVia, u64>,

    /// Pages that yielded no text
    pub failures: u64,

    /// Pages that yielded text but were flagged (e.g. thin content)
    pub warnings: u64,
}

impl CrawlStatistics {
    /// Records the outcome of one fetch
    pub fn record(&mut self, page: &PageContent) {
        self.pages_attempted += 1;
        if page.is_failure() {
            self.failures += 1;
            return;
        }
        *self.pages_by_strategy.entry(page.fetched_via).or_insert(0) += 1;
        if page.error.is_some() {
            self.warnings += 1;
        }
    }

    /// Records a URL that could not be fetched at all
    pub fn record_unfetchable(&mut self) {
        self.pages_attempted += 1;
        self.failures += 1;
    }

    /// Adds another tally to this one
    pub fn merge(&mut self, other: &CrawlStatistics) {
        self.pages_attempted += other.pages_attempted;
        self.failures += other.failures;
        self.warnings += other.warnings;
        for (via, count) in &other.pages_by_strategy {
            *self.pages_by_strategy.entry(*via).or_insert(0) += count;
        }
    }

    pub fn pages_extracted(&self) -> u64 {
        self.pages_by_strategy.values().sum()
    }

    /// Percentage of attempted pages that yielded text
    pub fn success_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 0.0;
        }
        (self.pages_extracted() as f64 / self.pages_attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Overview:");
    println!("  Pages attempted: {}", stats.pages_attempted);
    println!("  Pages extracted: {}", stats.pages_extracted());
    println!("  Failures: {}", stats.failures);
    println!("  Warnings: {}", stats.warnings);
    println!();

    if !stats.pages_by_strategy.is_empty() {
        println!("Pages by Strategy:");
        let mut strategy_counts: Vec<_> = stats.pages_by_strategy.iter().collect();
        strategy_counts.sort_by(|a, b| b.1.cmp(a.1));

        for (via, count) in strategy_counts {
            println!("  {:?}: {}", via, count);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages extracted)",
        stats.success_rate(),
        stats.pages_extracted(),
        stats.pages_attempted
    );
}
