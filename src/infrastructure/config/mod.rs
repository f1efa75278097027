//! Infrastructure configuration modules.

pub mod logging;
pub mod session;
pub mod settings;
pub mod storage;
pub mod watcher;

pub use logging::LoggingConfig;
pub use session::SessionConfig;
pub use settings::Config;
pub use storage::StorageConfig;
pub use watcher::WatcherConfig;
