//! Pagination planning for region listing sites
//!
//! Region sites list a fixed number of breweries per page. Given the count
//! the index page declares, the planner decides which page URLs to visit.

use crate::url::paged_url;
use url::Url;

/// Number of records each listing page holds
pub const PAGE_SIZE: u32 = 12;

/// One listing page to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub index: u32,

    /// URL of the page
    pub url: Url,
}

/// Pages to visit for one region
///
/// The plan is a page count over a base URL; page requests are produced on
/// demand by [`PagePlan::pages`], so a large declared count costs nothing
/// until pages are actually visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    /// `ceil(declared_count / PAGE_SIZE)`
    pub num_pages: u32,

    base: Url,
}

impl PagePlan {
    /// Number of pages the plan visits; at least 1
    pub fn page_count(&self) -> u32 {
        self.num_pages.max(1)
    }

    /// Page requests in visiting order; never empty
    pub fn pages(&self) -> impl Iterator<Item = PageRequest> + '_ {
        std::iter::once(1)
            .chain(2..=self.num_pages)
            .map(|index| PageRequest {
                index,
                url: paged_url(&self.base, index),
            })
    }
}

/// Number of pages needed to hold `declared_count` records
pub fn num_pages(declared_count: u32) -> u32 {
    declared_count.div_ceil(PAGE_SIZE)
}

/// Plans the listing pages for a region
///
/// Page 1 is the base URL and is always planned, even when the declared count
/// is zero. Pages `2..=num_pages` follow with a `p=<index>` query parameter.
///
/// # Example
///
/// ```
/// use brewery_atlas::crawler::plan_pages;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/brewpub/ohio").unwrap();
/// let plan = plan_pages(&base, 25);
/// let urls: Vec<_> = plan.pages().map(|p| p.url.to_string()).collect();
/// assert_eq!(
///     urls,
///     vec![
///         "https://example.com/brewpub/ohio",
///         "https://example.com/brewpub/ohio?p=2",
///         "https://example.com/brewpub/ohio?p=3",
///     ]
/// );
/// ```
pub fn plan_pages(base: &Url, declared_count: u32) -> PagePlan {
    PagePlan {
        num_pages: num_pages(declared_count),
        base: base.clone(),
    }
}
