use crate::config::types::{Config, OutputConfig, RequestConfig, SelectorConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_request_config(&config.request)?;
    validate_selector_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the search target
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "category cannot be empty".to_string(),
        ));
    }

    if config.keywords.is_empty() {
        return Err(ConfigError::Validation(
            "at least one keyword is required".to_string(),
        ));
    }

    if config.keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "keywords cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates request headers and timeouts
fn validate_request_config(config: &RequestConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.accept.is_empty() {
        return Err(ConfigError::Validation("accept cannot be empty".to_string()));
    }

    if config.crawl_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "crawl_timeout_ms must be >= 1ms, got {}ms",
            config.crawl_timeout_ms
        )));
    }

    Ok(())
}

/// Validates that every selector compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    if config.titles.is_empty() {
        return Err(ConfigError::Validation(
            "at least one title selector is required".to_string(),
        ));
    }

    let singles = [
        &config.result_item,
        &config.link,
        &config.price,
        &config.detail_section,
        &config.detail_specs,
    ];

    for selector in singles.into_iter().chain(config.titles.iter()) {
        validate_selector(selector)?;
    }

    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(
            "selector cannot be empty".to_string(),
        ));
    }

    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.currency.is_empty() {
        return Err(ConfigError::Validation(
            "currency cannot be empty".to_string(),
        ));
    }

    Ok(())
}
