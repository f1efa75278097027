//! Registry of open session stores.
//!
//! Components that open "the same" database within one process share a
//! single [`SqliteStorage`] backend, so the schema is migrated once and no
//! two pools contend for the file lock.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::store::SqliteStorage;
use crate::adapter::outbound::sqlite::database::connection::IN_MEMORY;
use crate::error::Result;
use crate::infrastructure::config::StorageConfig;
use crate::port::outbound::store::Storage;

/// Explicitly owned map from database path to its shared store.
#[derive(Debug, Default)]
pub struct StorageRegistry {
    config: StorageConfig,
    stores: Mutex<HashMap<PathBuf, SqliteStorage>>,
}

impl StorageRegistry {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Open the configured default store.
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened.
    pub fn open_default(&self) -> Result<SqliteStorage> {
        let path = self.config.path.clone();
        self.open(path)
    }

    /// Return the store for `path`, opening it on first use.
    ///
    /// In-memory databases are private and never shared.
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<SqliteStorage> {
        let path = path.as_ref();
        if path.as_os_str() == IN_MEMORY {
            return SqliteStorage::open(path, &self.config);
        }

        let key = normalize(path)?;
        let mut stores = self.stores.lock();
        if let Some(store) = stores.get(&key) {
            if !store.is_destroyed() {
                debug!(path = %key.display(), "Reusing open session storage");
                return Ok(store.clone());
            }
        }

        let store = SqliteStorage::open(&key, &self.config)?;
        stores.insert(key, store.clone());
        Ok(store)
    }

    /// Forget the store for `path`. Handles already given out stay usable.
    pub fn close(&self, path: impl AsRef<Path>) -> bool {
        match normalize(path.as_ref()) {
            Ok(key) => self.stores.lock().remove(&key).is_some(),
            Err(_) => false,
        }
    }

    /// Destroy and forget the store for `path`.
    ///
    /// Returns false when no store was open for `path`.
    ///
    /// # Errors
    /// Returns an error if the backing files cannot be removed.
    pub async fn destroy(&self, path: impl AsRef<Path>) -> Result<bool> {
        let key = normalize(path.as_ref())?;
        let store = self.stores.lock().remove(&key);
        match store {
            Some(store) => {
                store.destroy().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of stores currently shared through this registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve `path` to an absolute key, following symlinks in the parent
/// directory when it exists. The file itself may not exist yet.
fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let parent = absolute.parent().and_then(|p| p.canonicalize().ok());
    match (parent, absolute.file_name()) {
        (Some(parent), Some(name)) => Ok(parent.join(name)),
        _ => Ok(absolute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_shares_one_backend() {
        let dir = tempfile::tempdir().unwrap();
        let registry = StorageRegistry::default();

        let a = registry.open(dir.path().join("session.sqlite")).unwrap();
        let b = registry
            .open(dir.path().join(".").join("session.sqlite"))
            .unwrap();

        assert!(a.shares_backend_with(&b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn different_paths_get_different_backends() {
        let dir = tempfile::tempdir().unwrap();
        let registry = StorageRegistry::default();

        let a = registry.open(dir.path().join("a.sqlite")).unwrap();
        let b = registry.open(dir.path().join("b.sqlite")).unwrap();

        assert!(!a.shares_backend_with(&b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn in_memory_stores_are_never_shared() {
        let registry = StorageRegistry::default();

        let a = registry.open(IN_MEMORY).unwrap();
        let b = registry.open(IN_MEMORY).unwrap();

        assert!(!a.shares_backend_with(&b));
        assert!(registry.is_empty());
    }

    #[test]
    fn close_forgets_without_destroying() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.sqlite");
        let registry = StorageRegistry::default();

        let a = registry.open(&path).unwrap();
        assert!(registry.close(&path));
        assert!(!registry.close(&path));

        assert!(!a.is_destroyed());
        assert!(path.exists());
        let b = registry.open(&path).unwrap();
        assert!(!a.shares_backend_with(&b));
    }

    #[tokio::test]
    async fn destroy_removes_file_and_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.sqlite");
        let registry = StorageRegistry::default();

        let store = registry.open(&path).unwrap();
        assert!(path.exists());

        assert!(registry.destroy(&path).await.unwrap());
        assert!(store.is_destroyed());
        assert!(!path.exists());
        assert!(registry.is_empty());
        assert!(!registry.destroy(&path).await.unwrap());
    }

    #[tokio::test]
    async fn reopening_after_destroy_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.sqlite");
        let registry = StorageRegistry::default();

        let store = registry.open(&path).unwrap();
        store
            .store_breadcrumb("s", "t", "x", &serde_json::json!(1))
            .await
            .unwrap();
        store.destroy().await.unwrap();

        let fresh = registry.open(&path).unwrap();
        assert!(!fresh.shares_backend_with(&store));
        assert!(fresh.load_breadcrumb("s", "x").await.unwrap_err().is_not_found());
    }
}
