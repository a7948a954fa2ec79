//! Storage traits and error types
//!
//! This module defines the trait interface for product stores and the
//! associated error types.

use crate::storage::{NewProduct, ProductRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid product record: {0}")]
    InvalidRecord(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for product store implementations
///
/// Rows are append-only: a product is inserted once and never updated or
/// deleted through this interface.
pub trait ProductStore {
    /// Inserts a product and returns the id assigned by the store
    ///
    /// Products with an empty title or a non-positive price are rejected
    /// with `StorageError::InvalidRecord`.
    fn insert_product(&mut self, product: &NewProduct) -> StorageResult<i64>;

    /// Returns all stored products in insertion order
    fn list_products(&self) -> StorageResult<Vec<ProductRecord>>;

    /// Counts stored products
    fn count_products(&self) -> StorageResult<u64>;
}
