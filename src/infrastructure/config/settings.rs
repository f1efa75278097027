//! Session configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the session scope and the
//! storage path may be overridden from the environment so that several
//! independently launched test steps can share one session.
//!
//! # Example
//!
//! ```no_run
//! use snippets::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("snippets.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::session::SessionConfig;
use super::storage::StorageConfig;
use super::watcher::WatcherConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`SessionConfig::scope`].
pub const SCOPE_ENV: &str = "SNIPPETS_SCOPE";

/// Environment variable overriding [`StorageConfig::path`].
pub const STORAGE_PATH_ENV: &str = "SNIPPETS_STORAGE_PATH";

/// Main configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Polling interval and deadline used by the watchers.
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Backing store for breadcrumbs and the interaction trail.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session scope.
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content, resolving overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(scope) = lookup(SCOPE_ENV).filter(|s| !s.trim().is_empty()) {
            config.session.scope = scope;
        }
        if let Some(path) = lookup(STORAGE_PATH_ENV).filter(|s| !s.trim().is_empty()) {
            config.storage.path = path;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load a `.env` file from the working directory (if any) into the
    /// process environment, then load `path`.
    ///
    /// Lets a shell script pin `SNIPPETS_SCOPE` once for a sequence of steps.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    #[allow(clippy::result_large_err)]
    pub fn load_with_dotenv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load(path)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.watcher.validate()?;

        if self.storage.path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "storage.path",
            }
            .into());
        }
        if self.storage.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.session.scope.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "session.scope",
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse_toml_with("", no_env).unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.watcher, WatcherConfig::default());
        assert_eq!(config.storage.path, "snippets.sqlite");
        assert_eq!(config.storage.pool_size, 5);
        assert!(!config.session.scope.is_empty());
    }

    #[test]
    fn generated_scopes_differ_between_loads() {
        let a = Config::parse_toml_with("", no_env).unwrap();
        let b = Config::parse_toml_with("", no_env).unwrap();
        assert_ne!(a.session.scope, b.session.scope);
    }

    #[test]
    fn parses_all_sections() {
        let toml = r#"
            [logging]
            level = "debug"
            format = "json"

            [watcher]
            polling_interval_ms = 500
            timeout_ms = 5000

            [storage]
            path = "/tmp/session.sqlite"
            busy_timeout_ms = 100
            pool_size = 2

            [session]
            scope = "deploy-and-stake"
        "#;

        let config = Config::parse_toml_with(toml, no_env).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.watcher.polling_interval_ms, 500);
        assert_eq!(config.watcher.timeout_ms, 5000);
        assert_eq!(config.storage.path, "/tmp/session.sqlite");
        assert_eq!(config.storage.busy_timeout_ms, 100);
        assert_eq!(config.storage.pool_size, 2);
        assert_eq!(config.session.scope, "deploy-and-stake");
    }

    #[test]
    fn environment_overrides_scope_and_path() {
        let toml = r#"
            [session]
            scope = "from-file"
        "#;
        let config = Config::parse_toml_with(toml, |key| match key {
            SCOPE_ENV => Some("from-env".to_string()),
            STORAGE_PATH_ENV => Some("env.sqlite".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.session.scope, "from-env");
        assert_eq!(config.storage.path, "env.sqlite");
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = Config::parse_toml_with("[session]\nscope = \"kept\"", |_| {
            Some("  ".to_string())
        })
        .unwrap();
        assert_eq!(config.session.scope, "kept");
    }

    #[test]
    fn invalid_watcher_is_rejected() {
        let toml = r#"
            [watcher]
            polling_interval_ms = 1000
            timeout_ms = 1000
        "#;
        let result = Config::parse_toml_with(toml, no_env);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::parse_toml_with("[watcher", no_env);
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = Config::load("/definitely/not/here/snippets.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }
}
