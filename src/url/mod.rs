//! URL construction for Product-Crawler
//!
//! The storefront exposes two kinds of pages: the search-results page, built
//! from a category and keyword list, and product detail pages, addressed by a
//! site-relative href captured from the listing markup.

use crate::config::SiteConfig;
use url::Url;

/// Builds the search-results URL for the configured category and keywords
///
/// The keywords are joined with spaces before form-encoding, which renders
/// them as `k=samsung+galaxy+s24`.
///
/// # Examples
///
/// ```
/// use product_crawler::config::SiteConfig;
/// use product_crawler::url::build_search_url;
///
/// let url = build_search_url(&SiteConfig::default()).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.amazon.pl/s?k=samsung+galaxy+s24&i=electronics"
/// );
/// ```
pub fn build_search_url(site: &SiteConfig) -> Result<Url, url::ParseError> {
    let search_path = format!("{}/s", site.base_url.trim_end_matches('/'));
    let keywords = site.keywords.join(" ");

    Url::parse_with_params(
        &search_path,
        &[("k", keywords.as_str()), ("i", site.category.as_str())],
    )
}

/// Joins the storefront base with a detail href
///
/// Site-relative hrefs are appended to the base verbatim, query string
/// included. An href that is already absolute is returned unchanged.
///
/// # Examples
///
/// ```
/// use product_crawler::url::detail_url;
///
/// assert_eq!(
///     detail_url("https://www.amazon.pl", "/dp/ABC"),
///     "https://www.amazon.pl/dp/ABC"
/// );
/// ```
pub fn detail_url(base_url: &str, href: &str) -> String {
    let href = href.trim();

    if Url::parse(href).is_ok() {
        return href.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}
