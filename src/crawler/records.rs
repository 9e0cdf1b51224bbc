//! Record extraction for listing pages
//!
//! Each brewery on a listing page is a name heading followed by a metadata
//! block. The block holds unlabeled value spans whose meaning depends only on
//! their position:
//!
//! | Position | Field   | Cleanup |
//! |----------|---------|---------|
//! | 0        | status  | all whitespace removed |
//! | 1        | phone   | discarded |
//! | 2        | address | newlines removed, ends trimmed |
//! | 3        | website | newlines removed, ends trimmed |
//!
//! Pages routinely omit the tail (closed breweries have no phone or
//! website), so missing positions simply leave fields empty.

use crate::model::ExtractedRecord;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Heading holding a brewery's name; one per record
pub const RECORD_HEADING_SELECTOR: &str = "h4.margin-bottom-s";

/// Value spans inside a record's metadata block
pub const VALUE_SPAN_SELECTOR: &str = "span.attr-value";

pub const STATUS_POSITION: usize = 0;
pub const PHONE_POSITION: usize = 1;
pub const ADDRESS_POSITION: usize = 2;
pub const WEBSITE_POSITION: usize = 3;

/// Number of value spans a complete record carries
pub const FULL_SPAN_COUNT: usize = WEBSITE_POSITION + 1;

static RECORD_HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(RECORD_HEADING_SELECTOR).expect("valid selector"));
static VALUE_SPANS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(VALUE_SPAN_SELECTOR).expect("valid selector"));

/// Records extracted from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Records in document order
    pub records: Vec<ExtractedRecord>,

    /// Headings whose metadata block was missing or empty, or whose name was blank
    pub warnings: usize,
}

impl PageExtraction {
    /// True when the page held no record headings at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses one listing page into records
///
/// A page without record headings yields an empty extraction; that is not an
/// error here, the caller decides how to report it.
pub fn extract_records(html: &str) -> PageExtraction {
    let document = Html::parse_document(html);
    let mut extraction = PageExtraction::default();

    for heading in document.select(&RECORD_HEADINGS) {
        let name = heading.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            tracing::warn!("Skipping record heading with no name");
            extraction.warnings += 1;
            continue;
        }

        let spans = match metadata_block(heading) {
            Some(block) => block
                .select(&VALUE_SPANS)
                .map(|span| span.text().collect::<String>())
                .collect::<Vec<_>>(),
            None => Vec::new(),
        };

        if spans.is_empty() {
            tracing::warn!("Record {:?} has no metadata values", name);
            extraction.warnings += 1;
        } else if spans.len() < FULL_SPAN_COUNT {
            tracing::debug!(
                "Record {:?} has {} of {} metadata values",
                name,
                spans.len(),
                FULL_SPAN_COUNT
            );
        }

        extraction.records.push(map_value_spans(name, &spans));
    }

    extraction
}

/// First element sibling after the heading
fn metadata_block(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    heading.next_siblings().find_map(ElementRef::wrap)
}

/// Maps positional value spans onto record fields
///
/// Positions past the end of `spans` leave their field empty. Spans beyond
/// [`WEBSITE_POSITION`] are ignored.
pub fn map_value_spans(name: String, spans: &[String]) -> ExtractedRecord {
    let at = |position: usize| spans.get(position).map(String::as_str).unwrap_or("");

    ExtractedRecord {
        name,
        status: strip_whitespace(at(STATUS_POSITION)),
        address: strip_newlines(at(ADDRESS_POSITION)),
        website: strip_newlines(at(WEBSITE_POSITION)),
    }
}

/// Removes every whitespace character, including embedded newlines
fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Removes line breaks and trims the ends, keeping internal spacing
fn strip_newlines(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect::<String>()
        .trim()
        .to_string()
}
