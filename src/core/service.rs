//! Service trait for record storage

use crate::core::record::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing records of one type
///
/// Implementations provide CRUD operations for a specific record type.
/// Missing records on `update`/`delete` and duplicate ids on `create`
/// surface as [`crate::core::error::HuskError`] wrapped in `anyhow`.
#[async_trait]
pub trait DataService<T: Record>: Send + Sync {
    /// Store a new record, assigning an id when it has none
    async fn create(&self, record: T) -> Result<T>;

    /// Get a record by ID
    async fn get(&self, id: &str) -> Result<Option<T>>;

    /// List all records in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing record
    async fn update(&self, id: &str, record: T) -> Result<T>;

    /// Delete a record
    async fn delete(&self, id: &str) -> Result<()>;

    /// Records whose text field equals `value` exactly
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;
}
