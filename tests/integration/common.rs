//! Shared helpers for building mock directory sites

use brewery_atlas::config::{Config, PageFailurePolicy};
use wiremock::{Match, Request};

/// Matches requests that carry no query string at all
pub struct NoQuery;

impl Match for NoQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query().is_none()
    }
}

/// Test configuration pointed at the mock server's directory page
pub fn test_config(base_url: &str, policy: PageFailurePolicy) -> Config {
    let mut config = Config::default();
    config.crawler.root_url = format!("{}/brewpub/", base_url);
    config.crawler.request_delay_ms = 0;
    config.crawler.max_concurrent_pages = 2;
    config.crawler.page_failure_policy = policy;
    config.fetcher.max_retries = 1;
    config.fetcher.backoff_base_ms = 0;
    config.fetcher.timeout_secs = 5;
    config
}

/// Directory page with one link and count label per region
pub fn index_page(base_url: &str, regions: &[(&str, u32)]) -> String {
    let mut html = String::from("<html><body><ul>");
    for (slug, count) in regions {
        html.push_str(&format!(
            r#"<li><a class="underline is-inline" href="{}/brewpub/{}">{}</a>
            <span class="count">{}</span></li>"#,
            base_url, slug, slug, count
        ));
    }
    html.push_str("</ul></body></html>");
    html
}

/// Listing page with records named `<prefix>-<n>` for n in `range`
pub fn listing_page(prefix: &str, range: std::ops::Range<u32>) -> String {
    let mut html = String::from("<html><body><ul>");
    for n in range {
        html.push_str(&format!(
            r#"<li>
                <h4 class="margin-bottom-s">{prefix}-{n}</h4>
                <div class="brewery-meta">
                    <p>Type: <span class="attr-value">
                        Brewpub
                    </span></p>
                    <p>Phone: <span class="attr-value">555-01{n:02}</span></p>
                    <p>Address: <span class="attr-value">{n} Main St, Springfield</span></p>
                    <p>Web: <span class="attr-value">{prefix}{n}.example.com</span></p>
                </div>
            </li>"#
        ));
    }
    html.push_str("</ul></body></html>");
    html
}
