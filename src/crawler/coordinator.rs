//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl pass that coordinates all other parts:
//! - Fetching and parsing the index page
//! - Collecting each region, several at a time
//! - Merging region results into one dataset in region order
//! - Building the crawl report

use crate::config::Config;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::index::extract_regions;
use crate::crawler::region::{RegionCollector, RegionOutput};
use crate::crawler::scheduler::Scheduler;
use crate::model::{Dataset, RegionRef};
use crate::output::CrawlReport;
use crate::AtlasError;
use futures::stream::{self, StreamExt};
use std::pin::pin;
use url::Url;

/// Result of a complete crawl pass
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub dataset: Dataset,
    pub report: CrawlReport,
}

/// Main crawler coordinator structure
pub struct Coordinator<F = HttpFetcher> {
    config: Config,
    root_url: Url,
    fetcher: F,
    scheduler: Scheduler,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(AtlasError)` - Invalid root URL or HTTP client failure
    pub fn new(config: Config) -> Result<Self, AtlasError> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetch> Coordinator<F> {
    /// Creates a coordinator around any fetcher
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, AtlasError> {
        let root_url = Url::parse(&config.crawler.root_url)?;
        let scheduler = Scheduler::from_config(&config);

        Ok(Self {
            config,
            root_url,
            fetcher,
            scheduler,
        })
    }

    /// Runs one crawl pass
    ///
    /// 1. Fetch the index page and extract region references
    /// 2. Collect regions, up to `max-concurrent-regions` at a time
    /// 3. Append each region's records in region order
    ///
    /// Index-level failures are fatal. Page-level failures are handled by
    /// the region collectors and show up in the report.
    pub async fn run(&self) -> Result<CrawlOutcome, AtlasError> {
        let mut report = CrawlReport::new(self.root_url.as_str());
        tracing::info!("Starting crawl at {}", self.root_url);

        let regions = self.discover_regions().await?;
        let declared: u64 = regions.iter().map(|r| u64::from(r.declared_count)).sum();
        tracing::info!(
            "Index lists {} regions with {} breweries",
            regions.len(),
            declared
        );

        let mut dataset = Dataset::with_capacity(usize::try_from(declared).unwrap_or(usize::MAX));
        let collector = RegionCollector::new(&self.fetcher, &self.scheduler, &self.config.crawler);
        let max_regions = self.config.crawler.max_concurrent_regions.max(1) as usize;

        let mut outputs = pin!(stream::iter(&regions)
            .map(|region| collector.collect(region))
            .buffered(max_regions));

        let mut regions_done = 0;
        while let Some(RegionOutput { records, report: region_report }) = outputs.next().await {
            dataset.extend_region(records);
            report.regions.push(region_report);

            regions_done += 1;
            tracing::info!(
                "Progress: {}/{} regions, {} records",
                regions_done,
                regions.len(),
                dataset.len()
            );
        }

        report.finish();
        tracing::info!(
            "Crawl completed: {} records from {} regions in {}s",
            dataset.len(),
            report.regions.len(),
            report.duration_seconds().unwrap_or(0)
        );

        Ok(CrawlOutcome { dataset, report })
    }

    /// Fetches the index page and extracts region references
    async fn discover_regions(&self) -> Result<Vec<RegionRef>, AtlasError> {
        let html = self
            .scheduler
            .fetch(&self.fetcher, self.root_url.as_str())
            .await?;
        extract_regions(&html, &self.root_url)
    }
}
