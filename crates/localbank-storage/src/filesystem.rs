//! Filesystem storage backends.
//!
//! [`FileDocumentStore`] keeps its working set in memory and rewrites a JSON
//! snapshot after every successful write. [`FileLocalStore`] persists a flat
//! JSON object of string values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::memory::{MemoryDocumentStore, Snapshot};
use crate::traits::{Document, DocumentStore, Fields, LocalStore, Query};

/// Snapshot file name inside the data directory.
pub const DOCUMENTS_FILE: &str = "documents.json";

/// Local store file name inside the data directory.
pub const LOCAL_FILE: &str = "local.json";

/// Write `contents` to `path` via a sibling temp file and rename.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(|e| Error::io_with_path(e, &tmp))?;
    fs::rename(&tmp, path).map_err(|e| Error::io_with_path(e, path))
}

/// Document store persisted as a JSON snapshot.
#[derive(Debug)]
pub struct FileDocumentStore {
    path: PathBuf,
    inner: MemoryDocumentStore,
    write_lock: Mutex<()>,
}

impl FileDocumentStore {
    /// Open (or create) the store under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let path = data_dir.as_ref().join(DOCUMENTS_FILE);
        let inner = if path.exists() {
            let raw = fs::read(&path).map_err(|e| Error::io_with_path(e, &path))?;
            let snapshot: Snapshot = serde_json::from_slice(&raw)?;
            log::debug!("Loaded document snapshot from {}", path.display());
            MemoryDocumentStore::from_snapshot(snapshot)
        } else {
            MemoryDocumentStore::new()
        };
        Ok(Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a mutation and persist the result while holding the write lock.
    fn mutate<T>(&self, op: impl FnOnce(&MemoryDocumentStore) -> Result<T>) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::backend("file store lock poisoned"))?;
        let out = op(&self.inner)?;
        let snapshot = self.inner.snapshot()?;
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        write_atomic(&self.path, &bytes)?;
        Ok(out)
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Document>> {
        self.inner.query_sync(collection, &query)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.inner.get_sync(collection, id)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String> {
        self.mutate(|inner| inner.create_sync(collection, fields))
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.mutate(|inner| inner.update_fields_sync(collection, id, fields))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.mutate(|inner| inner.delete_sync(collection, id))
    }

    async fn upsert_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.mutate(|inner| inner.upsert_merge_sync(collection, id, fields))
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

/// Key/value store persisted as a single JSON object file.
#[derive(Debug)]
pub struct FileLocalStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileLocalStore {
    /// Open (or create) the store under `data_dir`.
    ///
    /// An unreadable file is logged and replaced by an empty store on the
    /// next write.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let path = data_dir.as_ref().join(LOCAL_FILE);
        let entries = match fs::read(&path) {
            Ok(raw) => serde_json::from_slice(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable local store {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io_with_path(e, &path)),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, op: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::backend("local store lock poisoned"))?;
        op(&mut entries);
        let bytes = serde_json::to_vec_pretty(&*entries)?;
        write_atomic(&self.path, &bytes)
    }
}

impl LocalStore for FileLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::backend("local store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
