//! Configuration module for Product-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; missing keys keep the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use product_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Searching for: {}", config.site.keywords.join(" "));
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, OutputConfig, RequestConfig, SelectorConfig, SiteConfig, TitleMode, DEFAULT_ACCEPT,
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
