//! Crawler module for listing page fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Index page and listing page extraction
//! - Pagination planning
//! - Request scheduling and politeness
//! - Per-region collection and overall crawl coordination

mod coordinator;
mod fetcher;
mod index;
mod pagination;
mod records;
mod region;
mod scheduler;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, Fetch, HttpFetcher, BROWSER_USER_AGENT};
pub use index::{
    extract_regions, parse_count, MAX_DECLARED_COUNT, REGION_COUNT_SELECTOR, REGION_LINK_SELECTOR,
};
pub use pagination::{num_pages, plan_pages, PagePlan, PageRequest, PAGE_SIZE};
pub use records::{
    extract_records, map_value_spans, PageExtraction, ADDRESS_POSITION, PHONE_POSITION,
    STATUS_POSITION, WEBSITE_POSITION,
};
pub use region::{RegionCollector, RegionOutput};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::AtlasError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Fetch the index page and enumerate regions
/// 3. Plan, fetch and extract every region's listing pages
/// 4. Merge all records into one dataset
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The dataset and the crawl report
/// * `Err(AtlasError)` - The index page could not be fetched or understood
///
/// # Example
///
/// ```no_run
/// use brewery_atlas::config::Config;
/// use brewery_atlas::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = crawl(Config::default()).await?;
/// println!("{} breweries", outcome.dataset.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<CrawlOutcome, AtlasError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
