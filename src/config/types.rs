use serde::Deserialize;

/// Default storefront the crawler targets
pub const DEFAULT_BASE_URL: &str = "https://www.amazon.pl";

/// Browser-like User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Accept header sent with every request
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Main configuration structure for Product-Crawler
///
/// Every section falls back to the built-in defaults, so an empty TOML file
/// (or no file at all) yields a complete configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub request: RequestConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// What to search for and where
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host of the storefront; detail hrefs are appended to it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Search category (the `i` query parameter)
    pub category: String,

    /// Ordered search keywords (joined with `+` into the `k` query parameter)
    pub keywords: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category: "electronics".to_string(),
            keywords: vec![
                "samsung".to_string(),
                "galaxy".to_string(),
                "s24".to_string(),
            ],
        }
    }
}

/// HTTP request configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,

    /// Wall-clock deadline for the whole listing and detail pass (milliseconds)
    ///
    /// This is the only time limit: the HTTP client has no per-request or
    /// connect timeout of its own.
    #[serde(rename = "crawl-timeout-ms")]
    pub crawl_timeout_ms: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            crawl_timeout_ms: 60_000,
        }
    }
}

/// How the title selectors are applied to a result node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleMode {
    /// Every title selector is an independent pass; a node can yield one
    /// product per matching selector.
    #[default]
    EachClass,

    /// Selectors are tried in order and the first valid product wins.
    FirstMatch,
}

/// CSS selectors for the storefront's markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One search result
    #[serde(rename = "result-item")]
    pub result_item: String,

    /// Anchor pointing at the product detail page
    pub link: String,

    /// Title selectors, in the order they are tried
    pub titles: Vec<String>,

    #[serde(rename = "title-mode")]
    pub title_mode: TitleMode,

    /// Integer part of the displayed price
    pub price: String,

    /// Broad container on the detail page
    #[serde(rename = "detail-section")]
    pub detail_section: String,

    /// Specification block nested inside `detail_section`
    #[serde(rename = "detail-specs")]
    pub detail_specs: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            result_item: ".s-result-item".to_string(),
            link: ".a-link-normal".to_string(),
            titles: vec![".a-size-base-plus".to_string(), ".a-size-medium".to_string()],
            title_mode: TitleMode::EachClass,
            price: ".a-price-whole".to_string(),
            detail_section: ".a-section".to_string(),
            detail_specs: ".a-section.a-spacing-small.a-spacing-top-small".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Currency suffix printed after prices
    pub currency: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "crawld_data.db".to_string(),
            currency: "PLN".to_string(),
        }
    }
}
