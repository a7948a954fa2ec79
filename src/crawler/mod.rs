//! Crawler module for page fetching and product extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with fixed request headers
//! - Search-results extraction and price cleanup
//! - Detail page specification tables
//! - Overall crawl coordination under a deadline

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod parser;
mod price;

pub use coordinator::{Coordinator, CrawlSummary};
pub use detail::{fetch_details, parse_spec_rows, DetailSelectors, ProductDetails, SpecRow};
pub use fetcher::{build_http_client, fetch_page};
pub use listing::{parse_listing, ListingEntry, ListingSelectors};
pub use price::parse_price;

use crate::config::Config;
use crate::CrawlerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the product store
/// 2. Build the HTTP client
/// 3. Fetch the search-results page and extract listings
/// 4. Fetch each listing's detail page and print its specifications to stdout
/// 5. Record each listing in the store
///
/// Use [`Coordinator`] directly to send the console output elsewhere.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed or hit its deadline
/// * `Err(CrawlerError)` - Crawl failed
pub async fn crawl(config: Config) -> Result<CrawlSummary, CrawlerError> {
    Coordinator::new(config)?.run().await
}
