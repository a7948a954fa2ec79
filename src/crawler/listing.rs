//! Search-results extraction
//!
//! Each result node is read with every configured title selector. In
//! `TitleMode::EachClass` the selectors are independent passes, so a node
//! rendered with both title layouts yields two entries; in
//! `TitleMode::FirstMatch` the first valid pass wins.

use crate::config::{SelectorConfig, TitleMode};
use crate::crawler::parser::{collect_text, compile_selector};
use crate::crawler::price::parse_price;
use crate::storage::NewProduct;
use crate::url::detail_url;
use crate::CrawlerError;
use scraper::{ElementRef, Html, Selector};

/// A valid product found on the search page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub title: String,
    pub price: f64,
    /// Detail page path as it appears in the markup
    pub href: String,
}

impl ListingEntry {
    /// Converts the entry into a storable product with an absolute URL
    pub fn to_product(&self, base_url: &str) -> NewProduct {
        NewProduct {
            title: self.title.clone(),
            price: self.price,
            url: detail_url(base_url, &self.href),
        }
    }
}

/// Compiled selectors for the search-results page
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    result_item: Selector,
    link: Selector,
    titles: Vec<Selector>,
    price: Selector,
    mode: TitleMode,
}

impl ListingSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, CrawlerError> {
        let titles = config
            .titles
            .iter()
            .map(|title| compile_selector(title))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            result_item: compile_selector(&config.result_item)?,
            link: compile_selector(&config.link)?,
            titles,
            price: compile_selector(&config.price)?,
            mode: config.title_mode,
        })
    }
}

/// Extracts every valid listing entry from a search-results page
///
/// Entries with an empty title or a price that is not strictly positive are
/// dropped silently. A valid entry whose node has no detail link is dropped
/// with a warning.
pub fn parse_listing(html: &str, selectors: &ListingSelectors) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for node in document.select(&selectors.result_item) {
        extract_entries(node, selectors, &mut entries);
    }

    entries
}

fn extract_entries(node: ElementRef<'_>, selectors: &ListingSelectors, out: &mut Vec<ListingEntry>) {
    let href = node
        .select(&selectors.link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty());

    let price = parse_price(&collect_text(node, &selectors.price));

    for title_selector in &selectors.titles {
        let title = collect_text(node, title_selector).trim().to_string();

        if title.is_empty() || !(price > 0.0) {
            continue;
        }

        let Some(href) = href else {
            tracing::warn!("Skipping '{}': result has no detail link", title);
            continue;
        };

        out.push(ListingEntry {
            title,
            price,
            href: href.to_string(),
        });

        if selectors.mode == TitleMode::FirstMatch {
            break;
        }
    }
}
