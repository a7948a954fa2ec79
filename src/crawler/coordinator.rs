//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns every resource of a crawl:
//! - The validated configuration
//! - The HTTP client
//! - The product store, opened once and closed when the run ends
//! - The console sink progress is written to (stdout unless replaced)
//!
//! A run moves through `FetchingListing`, then `FetchingDetail` and
//! `Recording` once per valid listing entry, and ends in `Done`. The whole
//! pass is bounded by the crawl deadline; on expiry the in-flight request is
//! dropped and the run ends as `TimedOut`. Any other error ends the run and is
//! returned to the caller.

use crate::config::{validate, Config};
use crate::crawler::detail::{fetch_details, DetailSelectors};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::listing::{parse_listing, ListingSelectors};
use crate::output::console::{render_details, render_listing_footer, render_listing_header};
use crate::storage::{open_storage, ProductStore, SqliteStorage};
use crate::url::{build_search_url, detail_url};
use crate::CrawlerError;
use reqwest::Client;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use url::Url;

/// Outcome of a crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Rows written to the store during this run
    pub products_recorded: usize,

    /// True if the crawl deadline expired before the pass finished
    pub timed_out: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    storage: SqliteStorage,
    client: Client,
    listing_selectors: ListingSelectors,
    detail_selectors: DetailSelectors,
    search_url: Url,
    out: Box<dyn Write + Send>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Validates the configuration, opens (or creates) the product store and
    /// builds the HTTP client.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlerError)` - Invalid configuration or the store could not be opened
    pub fn new(config: Config) -> Result<Self, CrawlerError> {
        validate(&config)?;

        let search_url = build_search_url(&config.site)?;
        let listing_selectors = ListingSelectors::compile(&config.selectors)?;
        let detail_selectors = DetailSelectors::compile(&config.selectors)?;
        let client = build_http_client(&config.request)?;

        let storage = open_storage(Path::new(&config.output.database_path))?;

        Ok(Self {
            config,
            storage,
            client,
            listing_selectors,
            detail_selectors,
            search_url,
            out: Box::new(io::stdout()),
        })
    }

    /// Replaces the console sink
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// The search-results URL this coordinator will fetch
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Runs the crawl and closes the store
    ///
    /// A timeout is not an error: it is reported, the store is closed, and
    /// the summary has `timed_out` set. Rows inserted before the deadline
    /// remain in the store.
    pub async fn run(mut self) -> Result<CrawlSummary, CrawlerError> {
        writeln!(self.out, "Start crawling {}", self.search_url)?;

        let deadline = Duration::from_millis(self.config.request.crawl_timeout_ms);
        let start_time = Instant::now();
        let mut summary = CrawlSummary::default();

        let outcome = tokio::time::timeout(
            deadline,
            self.crawl_products(&mut summary.products_recorded),
        )
        .await;

        match outcome {
            Ok(result) => result?,
            Err(_) => {
                summary.timed_out = true;
                writeln!(self.out, "Crawling process timed out after {:?}.", deadline)?;
                tracing::warn!(
                    "Crawl deadline of {:?} expired after {} products",
                    deadline,
                    summary.products_recorded
                );
            }
        }

        self.storage.close()?;

        tracing::info!(
            "Crawl finished: {} products recorded in {:?}",
            summary.products_recorded,
            start_time.elapsed()
        );

        Ok(summary)
    }

    /// Fetches the listing, then each detail page, recording as it goes
    ///
    /// Each product block is written in three parts: the title and price
    /// before its detail page is requested, the specification rows once the
    /// page arrives, and the closing separator just before the row is stored.
    async fn crawl_products(&mut self, recorded: &mut usize) -> Result<(), CrawlerError> {
        let body = fetch_page(&self.client, self.search_url.as_str()).await?;
        let entries = parse_listing(&body, &self.listing_selectors);

        tracing::info!("Found {} products on the search page", entries.len());

        let base_url = self.config.site.base_url.as_str();
        let currency = self.config.output.currency.as_str();

        for entry in entries {
            writeln!(self.out, "{}", render_listing_header(&entry, currency))?;

            let url = detail_url(base_url, &entry.href);
            let details = fetch_details(&self.client, &url, &self.detail_selectors).await?;

            writeln!(self.out, "{}", render_details(&details))?;
            writeln!(self.out, "{}", render_listing_footer())?;

            let id = self.storage.insert_product(&entry.to_product(base_url))?;
            *recorded += 1;

            tracing::debug!("Recorded product {} as row {}", entry.title, id);
        }

        Ok(())
    }
}
