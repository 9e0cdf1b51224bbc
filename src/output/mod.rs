//! Output module for persisting and reporting crawl results
//!
//! This module handles:
//! - Writing the dataset to a CSV file
//! - Reading the file back for a smoke check
//! - Recording and printing crawl statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{print_preview, read_preview, CsvOutput};
pub use stats::{print_report, CrawlReport, PageFailure, RegionReport};
pub use traits::{DatasetSink, OutputError, OutputResult};
