//! In-memory storage backends.
//!
//! Used by tests and by ephemeral deployments. [`MemoryDocumentStore`] is
//! also the working set behind [`crate::FileDocumentStore`].

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::timestamp::compare_values;
use crate::traits::{Direction, Document, DocumentStore, Fields, LocalStore, Query};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDocument {
    seq: u64,
    fields: Fields,
}

/// Serializable image of a [`MemoryDocumentStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    next_seq: u64,
    collections: HashMap<String, BTreeMap<String, StoredDocument>>,
}

/// Document store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    state: RwLock<Snapshot>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Copy out the current contents.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.read()?.clone())
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> Result<usize> {
        Ok(self
            .read()?
            .collections
            .get(collection)
            .map_or(0, BTreeMap::len))
    }

    /// Whether a collection is empty or missing.
    pub fn is_empty(&self, collection: &str) -> Result<bool> {
        Ok(self.len(collection)? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Snapshot>> {
        self.state
            .read()
            .map_err(|_| Error::backend("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Snapshot>> {
        self.state
            .write()
            .map_err(|_| Error::backend("memory store lock poisoned"))
    }

    pub(crate) fn query_sync(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        let state = self.read()?;
        let Some(docs) = state.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut hits: Vec<(&String, &StoredDocument)> = docs
            .iter()
            .filter(|(_, doc)| query.matches(&doc.fields))
            .collect();

        match &query.order_by {
            Some(order) => {
                hits.retain(|(_, doc)| doc.fields.contains_key(&order.field));
                hits.sort_by(|(_, a), (_, b)| {
                    let ord = compare_values(&a.fields[&order.field], &b.fields[&order.field]);
                    let ord = match order.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    };
                    // Ties: newest write first.
                    ord.then_with(|| b.seq.cmp(&a.seq))
                });
            }
            None => hits.sort_by_key(|(_, doc)| doc.seq),
        }

        Ok(hits
            .into_iter()
            .map(|(id, doc)| Document {
                id: id.clone(),
                fields: doc.fields.clone(),
            })
            .collect())
    }

    pub(crate) fn get_sync(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .read()?
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|doc| Document {
                id: id.to_string(),
                fields: doc.fields.clone(),
            }))
    }

    pub(crate) fn create_sync(&self, collection: &str, fields: Fields) -> Result<String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut guard = self.write()?;
        let state = &mut *guard;
        let seq = state.next_seq;
        state.next_seq += 1;
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), StoredDocument { seq, fields });
        Ok(id)
    }

    pub(crate) fn update_fields_sync(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<()> {
        let mut state = self.write()?;
        let doc = state
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| Error::not_found(collection, id))?;
        doc.fields.extend(fields);
        Ok(())
    }

    pub(crate) fn delete_sync(&self, collection: &str, id: &str) -> Result<()> {
        let mut state = self.write()?;
        state
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| Error::not_found(collection, id))
    }

    pub(crate) fn upsert_merge_sync(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let mut guard = self.write()?;
        let state = &mut *guard;
        let docs = state.collections.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            Some(doc) => doc.fields.extend(fields),
            None => {
                let seq = state.next_seq;
                state.next_seq += 1;
                docs.insert(id.to_string(), StoredDocument { seq, fields });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Document>> {
        self.query_sync(collection, &query)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.get_sync(collection, id)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String> {
        self.create_sync(collection, fields)
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.update_fields_sync(collection, id, fields)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.delete_sync(collection, id)
    }

    async fn upsert_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.upsert_merge_sync(collection, id, fields)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Key/value store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryLocalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::backend("local store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::backend("local store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::backend("local store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
