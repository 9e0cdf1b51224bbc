//! Crawl statistics and reporting
//!
//! Region collectors fill in a [`RegionReport`] per region; the coordinator
//! gathers them into a [`CrawlReport`], which the entry point prints.

use crate::state::PageState;
use crate::FetchError;
use chrono::{DateTime, Utc};

/// A listing page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// 1-based page index within the region
    pub index: u32,

    /// The URL that failed
    pub url: String,

    /// Error message
    pub error: String,
}

/// Page outcome tallies for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionReport {
    pub region: String,
    pub url: String,
    pub declared_count: u32,
    pub pages_planned: usize,
    pub pages_processed: usize,
    pub pages_empty: usize,
    pub pages_failed: usize,
    pub pages_skipped: usize,

    /// Records collected from the region
    pub records: usize,

    /// Records with missing metadata, plus skipped blank headings
    pub warnings: usize,

    /// True when a page failure stopped the region early
    pub aborted: bool,

    pub failures: Vec<PageFailure>,
}

impl RegionReport {
    pub fn new(region: &str, url: &str, declared_count: u32, pages_planned: usize) -> Self {
        Self {
            region: region.to_string(),
            url: url.to_string(),
            declared_count,
            pages_planned,
            pages_processed: 0,
            pages_empty: 0,
            pages_failed: 0,
            pages_skipped: 0,
            records: 0,
            warnings: 0,
            aborted: false,
            failures: Vec::new(),
        }
    }

    /// Tallies one page outcome
    pub fn record_page(&mut self, state: PageState) {
        match state {
            PageState::Processed => self.pages_processed += 1,
            PageState::Empty => self.pages_empty += 1,
            PageState::Failed => self.pages_failed += 1,
            PageState::Skipped => self.pages_skipped += 1,
        }
    }

    /// Tallies a failed page and keeps its error
    pub fn record_failure(&mut self, index: u32, url: &str, error: &FetchError) {
        self.record_page(PageState::Failed);
        self.failures.push(PageFailure {
            index,
            url: url.to_string(),
            error: error.to_string(),
        });
    }

    /// Marks the region aborted; every page not yet tallied counts as skipped
    pub fn abort(&mut self) {
        self.aborted = true;
        self.pages_skipped = self.pages_planned.saturating_sub(self.pages_attempted());
    }

    /// Pages fetched successfully, with or without records
    pub fn pages_succeeded(&self) -> usize {
        PageState::all_states()
            .into_iter()
            .filter(PageState::is_success)
            .map(|state| self.pages_in(state))
            .sum()
    }

    /// Pages that were requested, successfully or not
    pub fn pages_attempted(&self) -> usize {
        self.pages_succeeded() + self.pages_failed
    }

    /// Count of pages in the given state
    pub fn pages_in(&self, state: PageState) -> usize {
        match state {
            PageState::Processed => self.pages_processed,
            PageState::Empty => self.pages_empty,
            PageState::Failed => self.pages_failed,
            PageState::Skipped => self.pages_skipped,
        }
    }

    /// True when the region ran to the end with no page in an error state
    pub fn is_complete(&self) -> bool {
        !self.aborted
            && PageState::all_states()
                .into_iter()
                .filter(PageState::is_error)
                .all(|state| self.pages_in(state) == 0)
    }
}

/// Summary of a whole crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub root_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Region reports in visitation order
    pub regions: Vec<RegionReport>,
}

impl CrawlReport {
    pub fn new(root_url: &str) -> Self {
        Self {
            root_url: root_url.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            regions: Vec::new(),
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<u64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds().max(0) as u64)
    }

    pub fn total_records(&self) -> usize {
        self.regions.iter().map(|r| r.records).sum()
    }

    pub fn total_declared(&self) -> u64 {
        self.regions.iter().map(|r| r.declared_count as u64).sum()
    }

    /// Total pages in the given state across all regions
    pub fn total_pages(&self, state: PageState) -> usize {
        self.regions.iter().map(|r| r.pages_in(state)).sum()
    }

    pub fn aborted_regions(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions.iter().filter(|r| r.aborted)
    }

    /// True when no page anywhere failed
    pub fn is_complete(&self) -> bool {
        self.regions.iter().all(RegionReport::is_complete)
    }
}

/// Prints the crawl report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Root URL: {}", report.root_url);
    println!("  Regions: {}", report.regions.len());
    println!(
        "  Records: {} collected / {} declared",
        report.total_records(),
        report.total_declared()
    );
    if let Some(seconds) = report.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Pages by State:");
    for state in PageState::all_states() {
        println!("  {}: {}", state, report.total_pages(state));
    }
    println!();

    println!("Regions:");
    for region in &report.regions {
        println!(
            "  {:<24} {:>5} records  {:>3}/{:<3} pages ok  {:>3} failed{}",
            region.region,
            region.records,
            region.pages_succeeded(),
            region.pages_planned,
            region.pages_failed,
            if region.aborted { "  (aborted)" } else { "" }
        );
    }
    println!();

    let failures: Vec<_> = report
        .regions
        .iter()
        .flat_map(|r| r.failures.iter().map(move |f| (r, f)))
        .collect();

    if !failures.is_empty() {
        println!("Failures ({}):", failures.len());
        for (region, failure) in failures {
            println!(
                "  - {} page {}: {} ({})",
                region.region, failure.index, failure.url, failure.error
            );
        }
        println!();
    }
}
