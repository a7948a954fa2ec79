//! Product detail pages
//!
//! The specification table lives in a block nested inside a broader page
//! section. Each table row carries two cells whose first `<span>` holds the
//! label and the value respectively.

use crate::config::SelectorConfig;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::{compile_selector, first_text};
use crate::CrawlerError;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::fmt;

/// One label/value pair from a specification table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub label: String,
    pub value: String,
}

impl fmt::Display for SpecRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// A fetched detail page
#[derive(Debug, Clone)]
pub struct ProductDetails {
    /// Absolute URL the page was fetched from
    pub url: String,
    pub specs: Vec<SpecRow>,
}

/// Compiled selectors for detail pages
#[derive(Debug, Clone)]
pub struct DetailSelectors {
    section: Selector,
    specs: Selector,
    table: Selector,
    row: Selector,
    cell: Selector,
    inline: Selector,
}

impl DetailSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, CrawlerError> {
        Ok(Self {
            section: compile_selector(&config.detail_section)?,
            specs: compile_selector(&config.detail_specs)?,
            table: compile_selector("table")?,
            row: compile_selector("tr")?,
            cell: compile_selector("td")?,
            inline: compile_selector("span")?,
        })
    }
}

/// Fetches a detail page and extracts its specification rows
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - Absolute detail page URL
/// * `selectors` - Compiled detail selectors
///
/// # Returns
///
/// * `Ok(ProductDetails)` - The page was fetched; `specs` may be empty
/// * `Err(CrawlerError)` - The fetch failed
pub async fn fetch_details(
    client: &Client,
    url: &str,
    selectors: &DetailSelectors,
) -> Result<ProductDetails, CrawlerError> {
    let body = fetch_page(client, url).await?;
    let specs = parse_spec_rows(&body, selectors);

    tracing::debug!("{} specification rows on {}", specs.len(), url);

    Ok(ProductDetails {
        url: url.to_string(),
        specs,
    })
}

/// Extracts specification rows from a detail page
///
/// Rows reachable through nested or overlapping sections are reported once,
/// in document order of discovery. Rows missing a cell or a cell's `<span>`
/// are skipped.
pub fn parse_spec_rows(html: &str, selectors: &DetailSelectors) -> Vec<SpecRow> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for section in document.select(&selectors.section) {
        for specs in section.select(&selectors.specs) {
            for table in specs.select(&selectors.table) {
                for row in table.select(&selectors.row) {
                    if !seen.insert(row.id()) {
                        continue;
                    }
                    if let Some(spec) = read_row(row, selectors) {
                        rows.push(spec);
                    }
                }
            }
        }
    }

    rows
}

fn read_row(row: ElementRef<'_>, selectors: &DetailSelectors) -> Option<SpecRow> {
    let mut cells = row.select(&selectors.cell);
    let (Some(label_cell), Some(value_cell)) = (cells.next(), cells.next()) else {
        tracing::debug!("Skipping specification row with fewer than two cells");
        return None;
    };

    let label = first_text(label_cell, &selectors.inline);
    let value = first_text(value_cell, &selectors.inline);

    match (label, value) {
        (Some(label), Some(value)) => Some(SpecRow { label, value }),
        _ => {
            tracing::debug!("Skipping specification row without inline text");
            None
        }
    }
}
