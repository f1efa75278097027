//! Snippets - session core for smart-contract interaction test harnesses.
//!
//! Test steps against a MultiversX network are usually run one at a time,
//! often as separate processes. This crate provides the state they share
//! and the waiting they all need:
//!
//! - **Awaiting** - [`application::ConditionalAwaiter`] polls a data source
//!   until a condition holds or a deadline passes; the account and
//!   transaction watchers build on it (e.g. `await_nonce`).
//! - **Breadcrumbs** - named, typed JSON values kept per session scope, so
//!   one step can save a deployed contract address and a later one load it.
//! - **Interaction trail** - every tracked contract call, with the caller's
//!   account snapshots before and after, plus a free-form audit log.
//!
//! # Modules
//!
//! - [`domain`] - Accounts, transactions, interactions and snapshots
//! - [`port`] - Traits for the network provider and the session store
//! - [`application`] - Awaiter, watchers, nonce tracking and sessions
//! - [`adapter`] - SQLite store and per-path store registry
//! - [`infrastructure`] - Configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Expose [`testkit`] (scripted provider and builders) to
//!   integration tests and downstream harnesses.
//!
//! # Example
//!
//! ```no_run
//! use snippets::adapter::outbound::sqlite::StorageRegistry;
//! use snippets::application::Session;
//! use snippets::domain::Address;
//! use snippets::infrastructure::config::Config;
//!
//! # async fn run() -> snippets::error::Result<()> {
//! let config = Config::load("snippets.toml")?;
//! config.init_logging();
//!
//! let registry = StorageRegistry::new(config.storage.clone());
//! let storage = registry.open(&config.storage.path)?;
//! let session = Session::new(config.session.scope.clone(), storage);
//!
//! session.save_address("adder", &Address::new("erd1qqqqqqqqqqqqqpgq")).await?;
//! let adder = session.load_address("adder").await?;
//! # let _ = adder;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
