//! End-to-end crawl tests against a mock directory site

use crate::common::{index_page, listing_page, test_config, NoQuery};
use brewery_atlas::config::PageFailurePolicy;
use brewery_atlas::crawler::{crawl, Coordinator};
use brewery_atlas::output::{read_preview, CsvOutput, DatasetSink};
use brewery_atlas::AtlasError;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_html(server: &MockServer, page_path: &str, page: Option<&str>, body: String) {
    let mock = Mock::given(method("GET")).and(path(page_path));
    let mock = match page {
        Some(p) => mock.and(query_param("p", p)),
        None => mock.and(NoQuery),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_regions_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/brewpub/",
        None,
        index_page(&base, &[("alaska", 5), ("ohio", 15)]),
    )
    .await;
    mount_html(&server, "/brewpub/alaska", None, listing_page("alaska", 0..5)).await;
    mount_html(&server, "/brewpub/ohio", None, listing_page("ohio", 0..12)).await;
    mount_html(&server, "/brewpub/ohio", Some("2"), listing_page("ohio", 12..15)).await;

    let config = test_config(&base, PageFailurePolicy::AbortRegion);
    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(outcome.dataset.len(), 20);

    let records = outcome.dataset.records();
    assert!(records[..5].iter().all(|r| r.region == "alaska"));
    assert!(records[5..].iter().all(|r| r.region == "ohio"));
    assert!(records[..5].iter().all(|r| r.region_total == 5));
    assert!(records[5..].iter().all(|r| r.region_total == 15));

    let ohio_names: Vec<_> = records[5..].iter().map(|r| r.name.clone()).collect();
    let expected: Vec<_> = (0..15).map(|n| format!("ohio-{}", n)).collect();
    assert_eq!(ohio_names, expected);

    let first = &records[0];
    assert_eq!(first.name, "alaska-0");
    assert_eq!(first.status, "Brewpub");
    assert_eq!(first.address, "0 Main St, Springfield");
    assert_eq!(first.website, "alaska0.example.com");

    assert!(outcome.report.is_complete());
    assert_eq!(outcome.report.total_records(), 20);
    assert_eq!(outcome.report.regions[1].pages_processed, 2);

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("breweries.csv");
    CsvOutput::new(&csv_path)
        .write_dataset(&outcome.dataset)
        .unwrap();

    let preview = read_preview(&csv_path, 5).unwrap();
    assert_eq!(preview, records[..5].to_vec());

    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 21);
    assert!(text.starts_with("brewery_name,type,address,website,state,state_breweries\n"));
}

#[tokio::test]
async fn test_zero_count_region_fetches_first_page_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/brewpub/", None, index_page(&base, &[("utah", 0)])).await;

    Mock::given(method("GET"))
        .and(path("/brewpub/utah"))
        .and(NoQuery)
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/brewpub/utah"))
        .and(query_param("p", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&base, PageFailurePolicy::AbortRegion);
    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();

    assert!(outcome.dataset.is_empty());
    let region = &outcome.report.regions[0];
    assert_eq!(region.region, "utah");
    assert_eq!(region.pages_planned, 1);
    assert_eq!(region.pages_empty, 1);
}

#[tokio::test]
async fn test_partial_last_page_plans_exactly_three_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/brewpub/", None, index_page(&base, &[("iowa", 25)])).await;

    let pages = [(None, 0..12), (Some("2"), 12..24), (Some("3"), 24..25)];
    for (page, range) in pages {
        let mock = Mock::given(method("GET")).and(path("/brewpub/iowa"));
        let mock = match page {
            Some(p) => mock.and(query_param("p", p)),
            None => mock.and(NoQuery),
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_string(listing_page("iowa", range)))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/brewpub/iowa"))
        .and(query_param("p", "4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&base, PageFailurePolicy::AbortRegion);
    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(outcome.dataset.len(), 25);
    assert_eq!(outcome.dataset.records()[24].name, "iowa-24");
    assert_eq!(outcome.report.regions[0].pages_processed, 3);
}

#[tokio::test]
async fn test_index_with_mismatched_labels_is_fatal() {
    let server = MockServer::start().await;
    let base = server.uri();

    let body = format!(
        r#"<a class="underline is-inline" href="{base}/brewpub/ohio">Ohio</a>
           <a class="underline is-inline" href="{base}/brewpub/utah">Utah</a>
           <span class="count">3</span>"#
    );
    mount_html(&server, "/brewpub/", None, body).await;

    let config = test_config(&base, PageFailurePolicy::AbortRegion);
    let result = Coordinator::new(config).unwrap().run().await;

    assert!(matches!(
        result,
        Err(AtlasError::StructuralMismatch {
            links: 2,
            counts: 1
        })
    ));
}

#[tokio::test]
async fn test_index_server_error_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brewpub/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), PageFailurePolicy::AbortRegion);
    let result = crawl(config).await;

    assert!(matches!(result, Err(AtlasError::Fetch(_))));
}

/// Region of 30 declared records whose second page always fails
async fn mount_failing_region(server: &MockServer) {
    let base = server.uri();
    mount_html(
        server,
        "/brewpub/",
        None,
        index_page(&base, &[("maine", 30), ("texas", 2)]),
    )
    .await;
    mount_html(server, "/brewpub/maine", None, listing_page("maine", 0..12)).await;
    Mock::given(method("GET"))
        .and(path("/brewpub/maine"))
        .and(query_param("p", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
    mount_html(
        server,
        "/brewpub/maine",
        Some("3"),
        listing_page("maine", 24..30),
    )
    .await;
    mount_html(server, "/brewpub/texas", None, listing_page("texas", 0..2)).await;
}

#[tokio::test]
async fn test_abort_region_keeps_earlier_pages_and_moves_on() {
    let server = MockServer::start().await;
    mount_failing_region(&server).await;

    let config = test_config(&server.uri(), PageFailurePolicy::AbortRegion);
    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();

    let maine = &outcome.report.regions[0];
    assert!(maine.aborted);
    assert_eq!(maine.records, 12);
    assert_eq!(maine.pages_failed, 1);
    assert_eq!(maine.pages_skipped, 1);
    assert_eq!(maine.failures[0].index, 2);

    let texas = &outcome.report.regions[1];
    assert!(texas.is_complete());
    assert_eq!(texas.records, 2);

    assert_eq!(outcome.dataset.len(), 14);
    assert_eq!(outcome.dataset.records()[12].region, "texas");
    assert!(!outcome.report.is_complete());
}

#[tokio::test]
async fn test_skip_page_continues_past_failed_page() {
    let server = MockServer::start().await;
    mount_failing_region(&server).await;

    let config = test_config(&server.uri(), PageFailurePolicy::SkipPage);
    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();

    let maine = &outcome.report.regions[0];
    assert!(!maine.aborted);
    assert_eq!(maine.records, 18);
    assert_eq!(maine.pages_processed, 2);
    assert_eq!(maine.pages_failed, 1);

    let names: Vec<_> = outcome.dataset.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names[11], "maine-11");
    assert_eq!(names[12], "maine-24");
    assert_eq!(names[18], "texas-0");
    assert_eq!(outcome.dataset.len(), 20);
}

#[tokio::test]
async fn test_implausible_count_label_is_rejected() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/brewpub/",
        None,
        format!(
            r#"<a class="underline is-inline" href="{base}/brewpub/ohio">Ohio</a>
               <span class="count">4,000,000,000</span>"#
        ),
    )
    .await;

    let config = test_config(&base, PageFailurePolicy::SkipPage);
    let result = Coordinator::new(config).unwrap().run().await;

    assert!(matches!(result, Err(AtlasError::InvalidCount { .. })));
}
