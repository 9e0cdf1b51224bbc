//! Brewery Atlas: a paginated brewery directory crawler
//!
//! This crate walks a directory site made of one index page and a set of
//! per-region listing sites, extracts every brewery record from every
//! listing page, and assembles them into a single ordered dataset.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Brewery Atlas operations
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error(
        "Index page structure mismatch: {links} region links but {counts} count labels"
    )]
    StructuralMismatch { links: usize, counts: usize },

    #[error("Invalid region count label: {text:?}")]
    InvalidCount { text: String },

    #[error("Invalid region link {href:?}")]
    InvalidRegionUrl { href: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Errors raised while turning a URL into page markup
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Returns true for failures worth another attempt: timeouts, transport
    /// errors, 5xx and 429 responses.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Http { .. } | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
        }
    }

    /// The URL the failed request targeted
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. } | Self::Timeout { url } | Self::Status { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Brewery Atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Dataset, ExtractedRecord, ItemRecord, RegionRef};
pub use state::PageState;
