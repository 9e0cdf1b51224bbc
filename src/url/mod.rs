//! URL handling for Brewery Atlas
//!
//! This module resolves region links found on the index page, derives region
//! names from their paths, and builds paginated listing URLs.

use url::Url;

/// Query parameter carrying the 1-based listing page index
pub const PAGE_PARAM: &str = "p";

/// Resolves an href from the index page to an absolute URL
///
/// Absolute hrefs are returned as-is; relative ones are joined onto
/// `base_url`. Surrounding whitespace in the attribute is ignored.
///
/// Returns None for empty hrefs, unparseable hrefs, and anything that does
/// not resolve to an HTTP(S) URL.
///
/// # Examples
///
/// ```
/// use brewery_atlas::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/brewpub/").unwrap();
/// let url = resolve_href(" oregon ", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/brewpub/oregon");
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let url = base_url.join(href).ok()?;
    if url.scheme() == "http" || url.scheme() == "https" {
        Some(url)
    } else {
        None
    }
}

/// Derives a region name from the last non-empty path segment
///
/// A trailing slash is ignored, so `/brewpub/oregon/` and `/brewpub/oregon`
/// both yield `oregon`. A URL with no path segments yields its host.
pub fn region_slug(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Builds the URL of listing page `index` for a region
///
/// Page 1 is the base URL unmodified; later pages carry `?p=<index>`.
pub fn paged_url(base: &Url, index: u32) -> Url {
    if index <= 1 {
        return base.clone();
    }

    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair(PAGE_PARAM, &index.to_string());
    url
}
