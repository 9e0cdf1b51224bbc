//! Core data model shared by the extractors, collectors and output
//!
//! Records flow through two shapes: [`ExtractedRecord`] is what a single page
//! yields, and [`ItemRecord`] is that record once region metadata has been
//! attached. [`Dataset`] is the ordered accumulation of every region.

use serde::{Deserialize, Serialize};
use url::Url;

/// A region listing discovered on the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRef {
    /// Base URL of the region's first listing page
    pub url: Url,

    /// Number of items the index page claims the region holds
    pub declared_count: u32,
}

impl RegionRef {
    pub fn new(url: Url, declared_count: u32) -> Self {
        Self {
            url,
            declared_count,
        }
    }

    /// Region name, taken from the last non-empty path segment of the URL
    pub fn name(&self) -> String {
        crate::url::region_slug(&self.url)
    }
}

/// One record as extracted from a listing page, before region metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub name: String,
    pub status: String,
    pub address: String,
    pub website: String,
}

impl ExtractedRecord {
    /// Attaches region metadata, producing the final record
    pub fn into_item(self, region: &str, region_total: u32) -> ItemRecord {
        ItemRecord {
            name: self.name,
            status: self.status,
            address: self.address,
            website: self.website,
            region: region.to_string(),
            region_total,
        }
    }
}

/// A fully attributed brewery record
///
/// Field order matches the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "brewery_name")]
    pub name: String,

    #[serde(rename = "type")]
    pub status: String,

    pub address: String,

    pub website: String,

    #[serde(rename = "state")]
    pub region: String,

    #[serde(rename = "state_breweries")]
    pub region_total: u32,
}

/// Output column names, in order
pub const COLUMNS: [&str; 6] = [
    "brewery_name",
    "type",
    "address",
    "website",
    "state",
    "state_breweries",
];

/// Upper bound on records reserved ahead of time
///
/// Declared counts come from the remote index page, so capacity hints derived
/// from them are clamped to this.
pub const MAX_PREALLOC_RECORDS: usize = 16_384;

/// Ordered collection of every record from every region
///
/// Insertion order is region visitation order, then page order, then
/// in-page order. Duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ItemRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dataset with room for `capacity` records, up to
    /// [`MAX_PREALLOC_RECORDS`]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity.min(MAX_PREALLOC_RECORDS)),
        }
    }

    /// Appends one region's records in order
    pub fn extend_region(&mut self, records: Vec<ItemRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ItemRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ItemRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ItemRecord;
    type IntoIter = std::slice::Iter<'a, ItemRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<ItemRecord>> for Dataset {
    fn from(records: Vec<ItemRecord>) -> Self {
        Self { records }
    }
}
