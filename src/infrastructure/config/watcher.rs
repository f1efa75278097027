//! Polling configuration for account and transaction watchers.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// How often a watcher polls and how long it waits overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WatcherConfig {
    /// Delay between two fetches (milliseconds).
    #[serde(default = "default_polling_interval_ms")]
    pub polling_interval_ms: u64,
    /// Deadline measured from the start of the wait (milliseconds).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_polling_interval_ms() -> u64 {
    6000 // one round
}

const fn default_timeout_ms() -> u64 {
    default_polling_interval_ms() * 15
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            polling_interval_ms: default_polling_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl WatcherConfig {
    /// Build a validated configuration from durations.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < polling_interval < timeout`.
    pub fn new(polling_interval: Duration, timeout: Duration) -> Result<Self> {
        let config = Self {
            polling_interval_ms: u64::try_from(polling_interval.as_millis()).unwrap_or(u64::MAX),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// # Errors
    ///
    /// Returns an error unless `0 < polling_interval_ms < timeout_ms`.
    pub fn validate(&self) -> Result<()> {
        if self.polling_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "polling_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.timeout_ms <= self.polling_interval_ms {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than polling_interval_ms".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
