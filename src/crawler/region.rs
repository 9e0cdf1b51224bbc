//! Region collection
//!
//! A region collector visits every planned listing page of one region,
//! extracts its records, and tags each with the region's name and declared
//! total. Pages may be fetched concurrently but are consumed strictly in page
//! order, so the output order never depends on network timing.

use crate::config::{CrawlerConfig, PageFailurePolicy};
use crate::crawler::fetcher::Fetch;
use crate::crawler::pagination::{plan_pages, PageRequest};
use crate::crawler::records::extract_records;
use crate::crawler::scheduler::Scheduler;
use crate::model::{ItemRecord, RegionRef, MAX_PREALLOC_RECORDS};
use crate::output::RegionReport;
use crate::state::PageState;
use crate::FetchError;
use futures::stream::{self, StreamExt};
use std::pin::pin;

/// Records and report produced for one region
#[derive(Debug, Clone)]
pub struct RegionOutput {
    /// Records in page order, then in-page order
    pub records: Vec<ItemRecord>,

    /// Page outcome tallies for the region
    pub report: RegionReport,
}

/// Drives pagination, fetching and extraction for single regions
pub struct RegionCollector<'a, F> {
    fetcher: &'a F,
    scheduler: &'a Scheduler,
    max_concurrent_pages: usize,
    policy: PageFailurePolicy,
}

impl<'a, F: Fetch> RegionCollector<'a, F> {
    /// Creates a collector sharing the crawl's fetcher and scheduler
    pub fn new(fetcher: &'a F, scheduler: &'a Scheduler, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            scheduler,
            max_concurrent_pages: config.max_concurrent_pages.max(1) as usize,
            policy: config.page_failure_policy,
        }
    }

    /// Collects every record of one region
    ///
    /// Page 1 is always fetched. When a page fails after the fetcher's
    /// retries, the failure policy decides whether the remaining pages are
    /// still visited; records from pages already consumed are kept either way.
    pub async fn collect(&self, region: &RegionRef) -> RegionOutput {
        let name = region.name();
        let plan = plan_pages(&region.url, region.declared_count);

        tracing::info!(
            "Collecting region {} ({} declared, {} pages)",
            name,
            region.declared_count,
            plan.page_count()
        );

        let mut report = RegionReport::new(
            &name,
            region.url.as_str(),
            region.declared_count,
            plan.page_count() as usize,
        );
        let mut records =
            Vec::with_capacity((region.declared_count as usize).min(MAX_PREALLOC_RECORDS));

        let mut results = pin!(stream::iter(plan.pages())
            .map(|page| self.fetch_page(page))
            .buffered(self.max_concurrent_pages));

        while let Some((page, result)) = results.next().await {
            match result {
                Ok(html) => {
                    let extraction = extract_records(&html);
                    report.warnings += extraction.warnings;

                    if extraction.is_empty() {
                        tracing::warn!("Page {} of {} yielded no records", page.index, name);
                        report.record_page(PageState::Empty);
                        continue;
                    }

                    tracing::debug!(
                        "Page {} of {} yielded {} records",
                        page.index,
                        name,
                        extraction.records.len()
                    );
                    report.record_page(PageState::Processed);
                    records.extend(
                        extraction
                            .records
                            .into_iter()
                            .map(|record| record.into_item(&name, region.declared_count)),
                    );
                }
                Err(error) => {
                    tracing::error!("Page {} of {} failed: {}", page.index, name, error);
                    report.record_failure(page.index, page.url.as_str(), &error);

                    if self.policy == PageFailurePolicy::AbortRegion {
                        tracing::warn!(
                            "Aborting region {} after page {} failed",
                            name,
                            page.index
                        );
                        report.abort();
                        break;
                    }
                }
            }
        }

        report.records = records.len();
        if !report.aborted && records.len() != region.declared_count as usize {
            tracing::warn!(
                "Region {} declared {} breweries but {} were collected",
                name,
                region.declared_count,
                records.len()
            );
        }

        tracing::info!(
            "Region {} done: {} records, {} pages ok, {} failed",
            name,
            report.records,
            report.pages_succeeded(),
            report.pages_failed
        );

        RegionOutput { records, report }
    }

    /// Fetches one page under the scheduler's politeness and retry rules
    async fn fetch_page(&self, page: PageRequest) -> (PageRequest, Result<String, FetchError>) {
        let result = self.scheduler.fetch(self.fetcher, page.url.as_str()).await;
        (page, result)
    }
}
