//! Integration tests for the crawler
//!
//! These tests use wiremock to serve search and detail pages and run the
//! full crawl cycle end-to-end against a temporary database.

use product_crawler::config::{Config, TitleMode};
use product_crawler::crawler::{crawl, Coordinator};
use product_crawler::output::SEPARATOR;
use product_crawler::storage::{ProductStore, SqliteStorage};
use product_crawler::CrawlerError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, db_path: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.output.database_path = db_path.to_string_lossy().to_string();
    config.request.crawl_timeout_ms = 10_000;
    config
}

/// Console sink the test keeps a handle to after the coordinator takes it
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("Output is not UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn position(output: &str, needle: &str) -> usize {
    output
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} missing from output:\n{}", needle, output))
}

fn temp_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("crawld_data.db");
    (dir, db_path)
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn result_item(title: &str, price: &str, href: &str) -> String {
    format!(
        r#"<div class="s-result-item" data-component-type="s-search-result">
             <a class="a-link-normal s-no-outline" href="{href}"><img src="x.jpg"></a>
             <h2><span class="a-size-medium a-color-base a-text-normal">{title}</span></h2>
             <span class="a-price"><span class="a-price-whole">{price}</span></span>
           </div>"#
    )
}

fn search_page(items: &[String]) -> String {
    format!(
        "<html><body><div class=\"s-main-slot\">{}</div></body></html>",
        items.concat()
    )
}

fn detail_page(specs: &[(&str, &str)]) -> String {
    let rows: String = specs
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><td class=\"a-span3\"><span class=\"a-text-bold\">{label}</span></td>\
                 <td class=\"a-span9\"><span class=\"po-break-word\">{value}</span></td></tr>"
            )
        })
        .collect();
    format!(
        r#"<html><body><div id="ppd"><div class="a-section">
             <div class="a-section a-spacing-small a-spacing-top-small"><table>{rows}</table></div>
           </div></div></body></html>"#
    )
}

async fn mount_search(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "samsung galaxy s24"))
        .and(query_param("i", "electronics"))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, detail_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(detail_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn stored_products(db_path: &Path) -> Vec<product_crawler::ProductRecord> {
    let storage = SqliteStorage::new(db_path).expect("Failed to reopen DB");
    storage.list_products().expect("Failed to list products")
}

#[tokio::test]
async fn test_full_crawl_records_only_valid_products() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(
        &mock_server,
        search_page(&[
            result_item("Galaxy S24", "3 299,00", "/dp/ABC"),
            result_item("Galaxy S23", "0,00", "/dp/DEF"),
        ]),
    )
    .await;
    mount_detail(
        &mock_server,
        "/dp/ABC",
        detail_page(&[("Brand", "Samsung"), ("Model", "Galaxy S24")]),
    )
    .await;

    // The invalid listing must never be followed
    Mock::given(method("GET"))
        .and(path("/dp/DEF"))
        .respond_with(html(detail_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (_dir, db_path) = temp_db();
    let config = create_test_config(&base_url, &db_path);

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.products_recorded, 1);
    assert!(!summary.timed_out);

    let products = stored_products(&db_path);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Galaxy S24");
    assert_eq!(products[0].price, 3299.0);
    assert_eq!(products[0].url, format!("{}/dp/ABC", base_url));
}

#[tokio::test]
async fn test_product_block_is_printed_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(
        &mock_server,
        search_page(&[result_item("Galaxy S24", "3 299,00", "/dp/ABC")]),
    )
    .await;
    mount_detail(
        &mock_server,
        "/dp/ABC",
        detail_page(&[("Brand", "Samsung"), ("Model", "Galaxy S24")]),
    )
    .await;

    let (_dir, db_path) = temp_db();
    let output = SharedBuffer::default();

    Coordinator::new(create_test_config(&base_url, &db_path))
        .expect("Failed to create coordinator")
        .with_output(output.clone())
        .run()
        .await
        .expect("Crawl failed");

    let text = output.contents();
    let start = position(&text, "Start crawling ");
    let separator = position(&text, SEPARATOR);
    let title = position(&text, "Title: Galaxy S24\n");
    let price = position(&text, "Price: 3299.00 PLN\n");
    let brand = position(&text, "Brand: Samsung\n");
    let model = position(&text, "Model: Galaxy S24\n");
    let url = position(&text, &format!("URL : {}/dp/ABC\n", base_url));
    let footer = text.rfind(SEPARATOR).expect("Closing separator missing");

    assert!(start < separator);
    assert!(separator < title && title < price);
    assert!(price < brand && brand < model && model < url);
    assert!(url < footer);
}

#[tokio::test]
async fn test_requests_carry_configured_headers() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let (_dir, db_path) = temp_db();
    let mut config = create_test_config(&base_url, &db_path);
    config.request.user_agent = "TestBot/1.0".to_string();
    config.request.accept = "text/html".to_string();

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(header("user-agent", "TestBot/1.0"))
        .and(header("accept", "text/html"))
        .respond_with(html(search_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let summary = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(summary.products_recorded, 0);
}

#[tokio::test]
async fn test_detail_page_without_specs_still_records() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(
        &mock_server,
        search_page(&[result_item("Galaxy A55", "1 399,00", "/dp/A55")]),
    )
    .await;
    mount_detail(
        &mock_server,
        "/dp/A55",
        "<html><body><p>No specifications</p></body></html>".to_string(),
    )
    .await;

    let (_dir, db_path) = temp_db();
    let summary = Coordinator::new(create_test_config(&base_url, &db_path))
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(summary.products_recorded, 1);
    assert_eq!(stored_products(&db_path)[0].price, 1399.0);
}

#[tokio::test]
async fn test_both_title_layouts_record_two_rows() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let item = r#"<div class="s-result-item">
        <a class="a-link-normal" href="/dp/BOTH">x</a>
        <span class="a-size-base-plus">Galaxy S24 Ultra</span>
        <span class="a-size-medium">Galaxy S24 Ultra 256GB</span>
        <span class="a-price-whole">5 499,</span>
    </div>"#
        .to_string();

    mount_search(&mock_server, search_page(&[item])).await;
    mount_detail(&mock_server, "/dp/BOTH", detail_page(&[("Brand", "Samsung")])).await;

    let (_dir, db_path) = temp_db();
    Coordinator::new(create_test_config(&base_url, &db_path))
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    let titles: Vec<String> = stored_products(&db_path)
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Galaxy S24 Ultra", "Galaxy S24 Ultra 256GB"]);

    // Same page in first-match mode yields a single row
    let (_dir2, db_path2) = temp_db();
    let mut config = create_test_config(&base_url, &db_path2);
    config.selectors.title_mode = TitleMode::FirstMatch;
    let summary = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(summary.products_recorded, 1);
}

#[tokio::test]
async fn test_listing_timeout_closes_store() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(html(search_page(&[])).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let (_dir, db_path) = temp_db();
    let mut config = create_test_config(&base_url, &db_path);
    config.request.crawl_timeout_ms = 200;

    let summary = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Timeout must not be an error");

    assert!(summary.timed_out);
    assert_eq!(summary.products_recorded, 0);
    assert!(stored_products(&db_path).is_empty());
}

#[tokio::test]
async fn test_detail_timeout_keeps_rows_recorded_before_deadline() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(
        &mock_server,
        search_page(&[
            result_item("Galaxy S24", "3 299,00", "/dp/FAST"),
            result_item("Galaxy S24+", "4 199,00", "/dp/SLOW"),
        ]),
    )
    .await;
    mount_detail(&mock_server, "/dp/FAST", detail_page(&[("Brand", "Samsung")])).await;
    Mock::given(method("GET"))
        .and(path("/dp/SLOW"))
        .respond_with(html(detail_page(&[])).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let (_dir, db_path) = temp_db();
    let mut config = create_test_config(&base_url, &db_path);
    config.request.crawl_timeout_ms = 1_000;
    let output = SharedBuffer::default();

    let summary = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .with_output(output.clone())
        .run()
        .await
        .expect("Timeout must not be an error");

    assert!(summary.timed_out);
    assert_eq!(summary.products_recorded, 1);

    // The stalled product's title and price are out before its detail request
    let text = output.contents();
    let stalled_title = position(&text, "Title: Galaxy S24+\n");
    let stalled_price = position(&text, "Price: 4199.00 PLN\n");
    let timed_out = position(&text, "Crawling process timed out after 1s.");
    assert!(stalled_title < stalled_price && stalled_price < timed_out);
    assert!(!text.contains(&format!("URL : {}/dp/SLOW", base_url)));

    let products = stored_products(&db_path);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].url, format!("{}/dp/FAST", base_url));
}

#[tokio::test]
async fn test_default_request_settings_leave_slow_listing_to_the_deadline() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(
            html(search_page(&[result_item("Galaxy S24", "3 299,00", "/dp/ABC")]))
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "/dp/ABC", detail_page(&[("Brand", "Samsung")])).await;

    // Only the deadline is scaled down; the request section keeps its defaults
    let (_dir, db_path) = temp_db();
    let mut config = Config::default();
    config.site.base_url = base_url.clone();
    config.output.database_path = db_path.to_string_lossy().to_string();
    config.request.crawl_timeout_ms = 3_000;

    let summary = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .with_output(io::sink())
        .run()
        .await
        .expect("A slow listing inside the deadline must succeed");

    assert!(!summary.timed_out);
    assert_eq!(summary.products_recorded, 1);
}

#[tokio::test]
async fn test_default_request_settings_stall_ends_as_timeout_not_error() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(html(search_page(&[])).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let (_dir, db_path) = temp_db();
    let mut config = Config::default();
    config.site.base_url = base_url;
    config.output.database_path = db_path.to_string_lossy().to_string();
    config.request.crawl_timeout_ms = 2_000;
    let output = SharedBuffer::default();

    let started = Instant::now();
    let summary = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .with_output(output.clone())
        .run()
        .await
        .expect("A stalled listing must end as a timeout, not an HTTP error");
    let elapsed = started.elapsed();

    assert!(summary.timed_out);
    assert_eq!(summary.products_recorded, 0);
    assert!(elapsed >= Duration::from_secs(2));
    assert!(elapsed < Duration::from_secs(10));
    assert!(output
        .contents()
        .contains("Crawling process timed out after 2s."));
    assert!(stored_products(&db_path).is_empty());
}

#[tokio::test]
async fn test_listing_http_error_propagates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let (_dir, db_path) = temp_db();
    let result = Coordinator::new(create_test_config(&base_url, &db_path))
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(matches!(
        result,
        Err(CrawlerError::HttpStatus { status: 503, .. })
    ));

    // The store was released on the error path and can be reopened
    assert!(stored_products(&db_path).is_empty());
}

#[tokio::test]
async fn test_detail_http_error_aborts_before_recording() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(
        &mock_server,
        search_page(&[result_item("Galaxy S24", "3 299,00", "/dp/GONE")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/dp/GONE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (_dir, db_path) = temp_db();
    let result = Coordinator::new(create_test_config(&base_url, &db_path))
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(matches!(
        result,
        Err(CrawlerError::HttpStatus { status: 404, .. })
    ));
    assert!(stored_products(&db_path).is_empty());
}

#[tokio::test]
async fn test_rows_accumulate_across_runs() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(
        &mock_server,
        search_page(&[result_item("Galaxy S24", "3 299,00", "/dp/ABC")]),
    )
    .await;
    mount_detail(&mock_server, "/dp/ABC", detail_page(&[("Brand", "Samsung")])).await;

    let (_dir, db_path) = temp_db();
    for _ in 0..2 {
        Coordinator::new(create_test_config(&base_url, &db_path))
            .expect("Failed to create coordinator")
            .run()
            .await
            .expect("Crawl failed");
    }

    let products = stored_products(&db_path);
    assert_eq!(products.len(), 2);
    assert!(products[1].id > products[0].id);
}

#[tokio::test]
async fn test_crawl_entry_point_runs_and_closes_store() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(
        &mock_server,
        search_page(&[result_item("Galaxy S24", "3 299,00", "/dp/ABC")]),
    )
    .await;
    mount_detail(&mock_server, "/dp/ABC", detail_page(&[("Brand", "Samsung")])).await;

    let (_dir, db_path) = temp_db();
    let summary = crawl(create_test_config(&base_url, &db_path))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.products_recorded, 1);
    assert!(!summary.timed_out);
    assert_eq!(stored_products(&db_path).len(), 1);
}
