//! Shared HTML helpers for the listing and detail extractors

use crate::CrawlerError;
use scraper::{ElementRef, Selector};

/// Compiles a CSS selector, mapping failures into `CrawlerError::Selector`
pub fn compile_selector(selector: &str) -> Result<Selector, CrawlerError> {
    Selector::parse(selector).map_err(|e| CrawlerError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Concatenates the text of every descendant of `scope` matching `selector`
///
/// Mirrors reading `.text` off a whole node set: several matches are joined
/// without separators.
pub fn collect_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .flat_map(|element| element.text())
        .collect()
}

/// Text of the first descendant matching `selector`, trimmed
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}
