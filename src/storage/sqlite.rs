//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ProductStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProductStore, StorageError, StorageResult};
use crate::storage::{NewProduct, ProductRecord};
use crate::CrawlerError;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
///
/// Owns the connection; dropping the storage closes the database on every
/// exit path. `close` does the same but reports errors.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(CrawlerError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, CrawlerError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened product database at {}", path.display());

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, CrawlerError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Closes the database, surfacing any error SQLite reports on close
    pub fn close(self) -> StorageResult<()> {
        self.conn.close().map_err(|(_, e)| StorageError::Sqlite(e))
    }
}

impl ProductStore for SqliteStorage {
    fn insert_product(&mut self, product: &NewProduct) -> StorageResult<i64> {
        if !product.is_valid() {
            return Err(StorageError::InvalidRecord(format!(
                "title={:?} price={}",
                product.title, product.price
            )));
        }

        self.conn.execute(
            "INSERT INTO products (title, price, url) VALUES (?1, ?2, ?3)",
            params![product.title, product.price, product.url],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_products(&self) -> StorageResult<Vec<ProductRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, price, url FROM products ORDER BY id")?;

        let products = stmt
            .query_map([], |row| {
                Ok(ProductRecord {
                    id: row.get(0)?,
                    title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    price: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
                    url: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    fn count_products(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
