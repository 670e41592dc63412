//! JSON document layer over a [`BlobStore`].
//!
//! A collection is a single `collections/{name}.json` array read and written
//! whole. Read-modify-write cycles go through [`Store::mutate`], which holds
//! a per-collection lock so two requests in this process cannot lose each
//! other's updates.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::blob::{BlobStore, LocalBlobStore, MemoryBlobStore};
use crate::error::StoreError;

/// Collection names.
pub mod collections {
    pub const ATTENDEES: &str = "attendees";
    pub const ORDERS: &str = "orders";
    pub const PHOTOS: &str = "photos";
    pub const PROJECTS: &str = "projects";
    pub const QUESTIONS: &str = "questions";
}

#[derive(Default)]
struct CollectionLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl CollectionLocks {
    fn get(&self, collection: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(collection.to_string()).or_default())
    }
}

/// Cheaply cloneable handle to the document store.
#[derive(Clone)]
pub struct Store {
    blobs: Arc<dyn BlobStore>,
    locks: Arc<CollectionLocks>,
}

impl Store {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            locks: Arc::new(CollectionLocks::default()),
        }
    }

    /// Store backed by process memory.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryBlobStore::new()))
    }

    /// Store backed by JSON files under `root`.
    pub async fn local(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let blobs = LocalBlobStore::open(root).await?;
        Ok(Self::new(Arc::new(blobs)))
    }

    pub fn blobs(&self) -> &dyn BlobStore {
        self.blobs.as_ref()
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.blobs.ping().await
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    fn collection_key(collection: &str) -> String {
        format!("collections/{collection}.json")
    }

    /// Read every record in a collection; a missing collection is empty.
    pub async fn read_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let key = Self::collection_key(collection);
        Ok(self.read_doc(&key).await?.unwrap_or_default())
    }

    /// Replace a whole collection.
    pub async fn write_all<T: Serialize>(&self, collection: &str, items: &[T]) -> Result<(), StoreError> {
        let lock = self.locks.get(collection);
        let _guard = lock.lock().await;
        self.write_doc(&Self::collection_key(collection), &items).await
    }

    /// Read a collection, let `f` change it, and write it back.
    ///
    /// The collection lock is held for the whole cycle. Nothing is written
    /// when `f` returns an error.
    pub async fn mutate<T, R, E, F>(&self, collection: &str, f: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let lock = self.locks.get(collection);
        let _guard = lock.lock().await;

        let key = Self::collection_key(collection);
        let mut items: Vec<T> = self.read_doc(&key).await?.unwrap_or_default();
        let result = f(&mut items)?;
        self.write_doc(&key, &items).await?;
        Ok(result)
    }

    // -----------------------------------------------------------------------
    // Single documents
    // -----------------------------------------------------------------------

    pub async fn get_doc<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.read_doc(key).await
    }

    /// Atomically create a document; `false` when the key is taken.
    pub async fn put_doc_if_absent<T: Serialize>(&self, key: &str, doc: &T) -> Result<bool, StoreError> {
        let bytes = encode(key, doc)?;
        self.blobs.put_if_absent(key, bytes).await
    }

    pub async fn delete_doc(&self, key: &str) -> Result<bool, StoreError> {
        self.blobs.delete(key).await
    }

    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.blobs.list(prefix).await
    }

    async fn read_doc<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(bytes) = self.blobs.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    async fn write_doc<T: Serialize + ?Sized>(&self, key: &str, doc: &T) -> Result<(), StoreError> {
        let bytes = encode(key, doc)?;
        self.blobs.put(key, bytes).await
    }
}

fn encode<T: Serialize + ?Sized>(key: &str, doc: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(doc).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}
