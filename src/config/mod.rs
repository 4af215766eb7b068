//! Configuration module for the scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or none at all) yields a usable
//! [`Config`].
//!
//! # Example
//!
//! ```no_run
//! use sitemap_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Render threshold: {} words", config.crawler.min_static_words);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserSettings, Config, CrawlerSettings, StorageSettings, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
