//! Storage module for persisting scraped products
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema management
//! - Appending product rows
//! - Reading products back for listing and verification

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{ProductStore, StorageError, StorageResult};

use crate::CrawlerError;

use std::path::Path;

/// Initializes or opens a product database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file (created if absent)
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(CrawlerError)` - Failed to open the file or create the schema
pub fn open_storage(path: &Path) -> Result<SqliteStorage, CrawlerError> {
    SqliteStorage::new(path)
}

/// A product about to be written; the id is assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub url: String,
}

impl NewProduct {
    /// Returns true if the product may be persisted
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && self.price > 0.0
    }
}

/// Represents a product row in the database
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub url: String,
}
