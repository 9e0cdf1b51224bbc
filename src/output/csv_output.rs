//! CSV output handler
//!
//! Writes the dataset as comma-separated text with a fixed header row and
//! standard quoting, and reads the head of the file back.

use crate::model::{Dataset, ItemRecord, COLUMNS};
use crate::output::traits::{DatasetSink, OutputError, OutputResult};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Dataset sink backed by a CSV file
pub struct CsvOutput {
    path: PathBuf,
}

impl CsvOutput {
    /// Creates a sink that writes to `path`, replacing any existing file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSink for CsvOutput {
    fn write_dataset(&mut self, dataset: &Dataset) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::File::create(&self.path)?;
        write_csv(file, dataset)?;

        tracing::info!(
            "Wrote {} records to {}",
            dataset.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes the header row and every record to `writer`
///
/// The header is written even when the dataset is empty.
pub fn write_csv<W: Write>(writer: W, dataset: &Dataset) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(COLUMNS)?;
    for record in dataset {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads the first `limit` records back from a CSV file
///
/// Fails if the header row is not the expected column list.
pub fn read_preview(path: &Path, limit: usize) -> OutputResult<Vec<ItemRecord>> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;

    let headers = reader.headers()?;
    if headers.iter().ne(COLUMNS.iter().copied()) {
        return Err(OutputError::Header {
            path: path.display().to_string(),
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    reader
        .deserialize()
        .take(limit)
        .map(|row| row.map_err(OutputError::from))
        .collect()
}

/// Prints preview rows to stdout with a leading row number
pub fn print_preview(records: &[ItemRecord]) {
    println!("   {}", COLUMNS.join(" | "));
    for (i, record) in records.iter().enumerate() {
        println!(
            "{:<2} {} | {} | {} | {} | {} | {}",
            i,
            record.name,
            record.status,
            record.address,
            record.website,
            record.region,
            record.region_total
        );
    }
}
