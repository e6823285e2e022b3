//! Storage abstraction traits.
//!
//! [`DocumentStore`] is the seam to the remote document database. It models
//! collections of JSON documents keyed by string ids, with equality filters
//! and a single order-by. [`LocalStore`] is the seam to local persisted
//! key/value storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Document body: a JSON object.
pub type Fields = serde_json::Map<String, Value>;

/// A document read from a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id.
    pub id: String,
    /// Document body.
    pub fields: Fields,
}

impl Document {
    /// Look up a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Equality filter on a top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field name.
    pub field: String,
    /// Required value.
    pub value: Value,
}

/// Order-by clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// Field name.
    pub field: String,
    /// Direction.
    pub direction: Direction,
}

/// A collection query: all filters must match; results are ordered by
/// `order_by` when present. Documents lacking the order-by field are
/// excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Equality filters.
    pub filters: Vec<Filter>,
    /// Optional ordering.
    pub order_by: Option<OrderBy>,
}

impl Query {
    /// Match every document, unordered.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality filter.
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Set the ordering.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Whether a document body passes all filters.
    pub fn matches(&self, fields: &Fields) -> bool {
        self.filters
            .iter()
            .all(|f| fields.get(&f.field) == Some(&f.value))
    }
}

/// Remote document database.
///
/// Each call is an independent request/response: no retries, no caching,
/// no transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a query against a collection.
    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Document>>;

    /// Fetch a single document.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Add a document with a store-assigned id and return that id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Overwrite the given top-level fields of an existing document.
    async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Delete an existing document.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Create the document if missing, otherwise merge top-level fields.
    async fn upsert_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Local persisted key/value storage.
pub trait LocalStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
