//! Output module for console reporting
//!
//! This module handles:
//! - Rendering product blocks and specification rows during a crawl
//! - Listing recorded products
//! - Summary statistics over the product table

pub mod console;
pub mod stats;

pub use console::{print_products, SEPARATOR};
pub use stats::{load_statistics, print_statistics, ProductStatistics};
