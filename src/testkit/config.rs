//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::WatcherConfig;

/// Watcher polling every 100ms with a 1s deadline.
///
/// Pair with `#[tokio::test(start_paused = true)]` so waits cost no real time.
pub fn fast_watcher() -> WatcherConfig {
    WatcherConfig {
        polling_interval_ms: 100,
        timeout_ms: 1_000,
    }
}

/// Watcher whose deadline is `polls` polling intervals of `interval_ms`.
pub fn watcher(interval_ms: u64, polls: u64) -> WatcherConfig {
    WatcherConfig {
        polling_interval_ms: interval_ms,
        timeout_ms: interval_ms * polls,
    }
}
