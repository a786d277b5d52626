//! Record store: the single point of entry for reads and writes against the
//! hosted spreadsheet service that holds the portfolio content.
//!
//! No other module talks to the data service directly. Handlers receive an
//! `Arc<dyn RecordStore>` through `AppState`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod airtable;
#[cfg(test)]
pub mod memory;

/// Field mapping of a single row, exactly as the store returns it.
pub type Fields = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A row of a store table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub id: String,
    #[serde(rename = "createdTime", default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

/// Server-side ordering requested on a list call. Every collection is read
/// newest or highest first, so the order is always descending on `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
}

impl SortSpec {
    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every row of `table`, optionally sorted by the store.
    async fn list(&self, table: &str, sort: Option<&SortSpec>)
        -> Result<Vec<RawRecord>, StoreError>;

    /// Appends a row to `table` and returns it as stored.
    async fn create(&self, table: &str, fields: Fields) -> Result<RawRecord, StoreError>;
}
