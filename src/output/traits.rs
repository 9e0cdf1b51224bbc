//! Output handler traits and errors
//!
//! This module defines the trait interface for dataset sinks and the errors
//! they raise.

use crate::model::Dataset;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected header in {path}: {found:?}")]
    Header { path: String, found: Vec<String> },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for dataset sinks
///
/// A sink receives the finished dataset once, whole, and persists it.
pub trait DatasetSink {
    /// Writes every record of the dataset in order
    ///
    /// # Arguments
    ///
    /// * `dataset` - The dataset to persist
    fn write_dataset(&mut self, dataset: &Dataset) -> OutputResult<()>;
}
