//! Storage backend configuration.

use serde::Deserialize;

/// SQLite storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
    /// How long a connection waits on a locked database (milliseconds).
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Maximum pooled connections per database file.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_path() -> String {
    "snippets.sqlite".to_string()
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

const fn default_pool_size() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_size: default_pool_size(),
        }
    }
}
