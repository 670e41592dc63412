//! Persistence for the event companion.
//!
//! Every collection is one JSON array document in a [`blob::BlobStore`];
//! claims are one document per email so they can be written with an atomic
//! create-if-absent.

pub mod blob;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::{RepoError, StoreError};
pub use store::Store;

/// Check that the backing blob store is reachable.
pub async fn health_check(store: &Store) -> Result<(), StoreError> {
    store.health_check().await
}
