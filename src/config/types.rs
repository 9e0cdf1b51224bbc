use serde::Deserialize;

/// Default directory page listing every region
pub const DEFAULT_ROOT_URL: &str = "https://www.beermonthclub.com/brewpub/";

/// Main configuration structure for Brewery Atlas
///
/// Every table is optional; a missing table or key falls back to its default,
/// so an empty file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Directory page the crawl starts from
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Maximum number of regions collected at once
    #[serde(rename = "max-concurrent-regions")]
    pub max_concurrent_regions: u32,

    /// Maximum number of listing pages fetched at once within a region
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: u32,

    /// Global cap on in-flight requests across all regions
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Minimum time between the start of two requests (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// What a region does when one of its pages cannot be fetched
    #[serde(rename = "page-failure-policy")]
    pub page_failure_policy: PageFailurePolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            max_concurrent_regions: 2,
            max_concurrent_pages: 4,
            max_concurrent_requests: 4,
            request_delay_ms: 250,
            page_failure_policy: PageFailurePolicy::default(),
        }
    }
}

/// Policy applied when a listing page fails after all retries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageFailurePolicy {
    /// Stop the region, keeping records from pages already collected
    #[default]
    AbortRegion,

    /// Record the failure and move on to the next page
    SkipPage,
}

/// HTTP fetching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Additional attempts after the first failure for transient errors
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff (milliseconds)
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 3,
            backoff_base_ms: 500,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file the dataset is written to
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Number of rows printed when the file is read back
    #[serde(rename = "preview-rows")]
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "breweries_us.csv".to_string(),
            preview_rows: 5,
        }
    }
}
