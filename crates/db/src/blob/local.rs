//! Blob store backed by files under a local directory.
//!
//! Used in development and for single-host deployments. Writes go to a
//! temporary sibling file first; `put` then renames it over the target and
//! `put_if_absent` hard-links it into place, which fails atomically when the
//! target already exists.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{validate_key, validate_prefix, BlobStore};
use crate::error::StoreError;

pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Write `bytes` to a fresh temp file next to `path`.
    async fn write_temp(&self, key: &str, path: &Path, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).await.map_err(io_err)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = parent.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&temp, bytes).await.map_err(io_err)?;
        Ok(temp)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temp = self.write_temp(key, &path, &bytes).await?;

        if let Err(source) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::Io {
                key: key.to_string(),
                source,
            });
        }
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, bytes: Vec<u8>) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        let temp = self.write_temp(key, &path, &bytes).await?;

        let linked = fs::hard_link(&temp, &path).await;
        let _ = fs::remove_file(&temp).await;

        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        validate_prefix(prefix)?;
        let dir = self.root.join(prefix.trim_end_matches('/'));

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    key: prefix.to_string(),
                    source,
                })
            }
        };

        let mut keys = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|source| StoreError::Io {
                key: prefix.to_string(),
                source,
            })?;
            let Some(entry) = entry else { break };

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if is_file {
                keys.push(format!("{prefix}{name}"));
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let meta = fs::metadata(&self.root)
            .await
            .map_err(|source| StoreError::Io {
                key: self.root.display().to_string(),
                source,
            })?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(StoreError::Io {
                key: self.root.display().to_string(),
                source: std::io::Error::new(ErrorKind::Other, "store root is not a directory"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;

    async fn temp_store() -> (tempfile::TempDir, LocalBlobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path().join("data")).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn put_get_delete() {
        let (_dir, store) = temp_store().await;

        assert_eq!(store.get("collections/orders.json").await.unwrap(), None);
        store
            .put("collections/orders.json", b"[]".to_vec())
            .await
            .unwrap();
        assert_eq!(
            store.get("collections/orders.json").await.unwrap(),
            Some(b"[]".to_vec())
        );

        store
            .put("collections/orders.json", b"[1]".to_vec())
            .await
            .unwrap();
        assert_eq!(
            store.get("collections/orders.json").await.unwrap(),
            Some(b"[1]".to_vec())
        );

        assert!(store.delete("collections/orders.json").await.unwrap());
        assert!(!store.delete("collections/orders.json").await.unwrap());
    }

    #[tokio::test]
    async fn put_if_absent_only_first_wins() {
        let (_dir, store) = temp_store().await;

        assert!(store.put_if_absent("claims/a.json", b"first".to_vec()).await.unwrap());
        assert!(!store.put_if_absent("claims/a.json", b"second".to_vec()).await.unwrap());
        assert_eq!(
            store.get("claims/a.json").await.unwrap(),
            Some(b"first".to_vec())
        );
    }

    #[tokio::test]
    async fn concurrent_put_if_absent_has_one_winner() {
        let (_dir, store) = temp_store().await;
        let store = Arc::new(store);

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            tasks.spawn(async move {
                store
                    .put_if_absent("claims/race.json", format!("{i}").into_bytes())
                    .await
                    .unwrap()
            });
        }

        let mut winners = 0;
        while let Some(won) = tasks.join_next().await {
            if won.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn list_skips_temp_files_and_sorts() {
        let (_dir, store) = temp_store().await;
        store.put("claims/b.json", b"{}".to_vec()).await.unwrap();
        store.put("claims/a.json", b"{}".to_vec()).await.unwrap();
        fs::write(store.root().join("claims/.a.json.tmp"), b"x")
            .await
            .unwrap();

        assert_eq!(
            store.list("claims/").await.unwrap(),
            vec!["claims/a.json".to_string(), "claims/b.json".to_string()]
        );
        assert!(store.list("missing/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let (_dir, store) = temp_store().await;
        assert_matches!(
            store.put("../escape.json", b"x".to_vec()).await,
            Err(StoreError::InvalidKey(_))
        );
    }

    #[tokio::test]
    async fn ping_checks_root() {
        let (_dir, store) = temp_store().await;
        assert!(store.ping().await.is_ok());
    }
}
