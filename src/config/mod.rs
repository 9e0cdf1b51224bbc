//! Configuration module for Brewery Atlas
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so the crawler also runs without a file.
//!
//! # Example
//!
//! ```no_run
//! use brewery_atlas::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("atlas.toml")).unwrap();
//! println!("Crawl starts at: {}", config.crawler.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, OutputConfig, PageFailurePolicy, DEFAULT_ROOT_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
