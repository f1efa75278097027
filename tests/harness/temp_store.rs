use std::path::{Path, PathBuf};

use snippets::adapter::outbound::sqlite::{SqliteStorage, StorageRegistry};
use snippets::application::Session;
use snippets::infrastructure::config::StorageConfig;
use tempfile::TempDir;

/// File-backed session store in a temporary directory.
pub struct TempStore {
    dir: TempDir,
    path: PathBuf,
    registry: StorageRegistry,
}

impl TempStore {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("{name}.sqlite"));
        let config = StorageConfig {
            path: path.display().to_string(),
            ..StorageConfig::default()
        };
        Self {
            dir,
            path,
            registry: StorageRegistry::new(config),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn registry(&self) -> &StorageRegistry {
        &self.registry
    }

    pub fn storage(&self) -> SqliteStorage {
        self.registry.open_default().expect("open session storage")
    }

    pub fn session(&self, scope: &str) -> Session<SqliteStorage> {
        Session::new(scope, self.storage())
    }
}
