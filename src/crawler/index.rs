//! Index page extraction
//!
//! The directory root lists every region twice over, in document order: once
//! as a link to the region's listing site and once as a count label holding
//! the number of breweries in that region. This module pairs the two lists.

use crate::model::RegionRef;
use crate::url::resolve_href;
use crate::AtlasError;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Anchors linking to region listing sites
pub const REGION_LINK_SELECTOR: &str = "a.underline.is-inline";

/// Labels carrying each region's declared brewery count
pub const REGION_COUNT_SELECTOR: &str = "span.count";

/// Largest count label accepted as a region size
pub const MAX_DECLARED_COUNT: u32 = 1_000_000;

static REGION_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(REGION_LINK_SELECTOR).expect("valid selector"));
static REGION_COUNTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(REGION_COUNT_SELECTOR).expect("valid selector"));

/// Parses the directory page into region references
///
/// Links and counts are paired positionally. The two lists must be the same
/// length; a mismatch means the page layout is not what we expect and no
/// region can be trusted, so it is an error rather than a truncated result.
///
/// # Arguments
///
/// * `html` - Markup of the directory page
/// * `page_url` - URL the page was fetched from, for resolving relative links
///
/// # Returns
///
/// * `Ok(Vec<RegionRef>)` - Regions in document order
/// * `Err(AtlasError::StructuralMismatch)` - Link and count lists differ in length
/// * `Err(AtlasError::InvalidCount)` - A count label is not a number or is
///   above [`MAX_DECLARED_COUNT`]
/// * `Err(AtlasError::InvalidRegionUrl)` - A link has no usable href
pub fn extract_regions(html: &str, page_url: &Url) -> Result<Vec<RegionRef>, AtlasError> {
    let document = Html::parse_document(html);

    let hrefs: Vec<&str> = document
        .select(&REGION_LINKS)
        .map(|a| a.value().attr("href").unwrap_or(""))
        .collect();

    let count_labels: Vec<String> = document
        .select(&REGION_COUNTS)
        .map(|span| span.text().collect::<String>())
        .collect();

    if hrefs.len() != count_labels.len() {
        tracing::error!(
            links = hrefs.len(),
            counts = count_labels.len(),
            "index page link and count lists are misaligned"
        );
        return Err(AtlasError::StructuralMismatch {
            links: hrefs.len(),
            counts: count_labels.len(),
        });
    }

    let mut regions = Vec::with_capacity(hrefs.len());
    for (href, label) in hrefs.into_iter().zip(count_labels) {
        let url = resolve_href(href, page_url).ok_or_else(|| AtlasError::InvalidRegionUrl {
            href: href.to_string(),
        })?;
        let declared_count =
            parse_count(&label).ok_or(AtlasError::InvalidCount { text: label })?;

        tracing::debug!("Found region {} ({} declared)", url, declared_count);
        regions.push(RegionRef::new(url, declared_count));
    }

    Ok(regions)
}

/// Parses a count label such as `42`, `(42)` or `1,204`
///
/// Counts above [`MAX_DECLARED_COUNT`] are rejected.
pub fn parse_count(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits
        .parse()
        .ok()
        .filter(|count| *count <= MAX_DECLARED_COUNT)
}
