//! Application services (use cases).
//!
//! These services combine the network provider and the storage port into
//! the operations test steps call: waiting on the network, assigning
//! nonces, and keeping scoped session state and the interaction trail.

pub mod awaiter;
pub mod nonce;
pub mod session;
pub mod tracker;
pub mod watcher;

pub use awaiter::{ConditionalAwaiter, PollResult};
pub use nonce::NonceTracker;
pub use session::Session;
pub use tracker::{InteractionTracker, TrackedInteraction};
pub use watcher::{AccountWatcher, TransactionWatcher};
