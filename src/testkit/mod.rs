//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`] - `ScriptedProvider`, a mock
//!   [`NetworkProvider`](crate::port::NetworkProvider) with scripted responses.
//! - [`domain`] - Builders for accounts, transactions and session records.
//! - [`config`] - Canonical fast watcher configurations.

pub mod config;
pub mod domain;
pub mod provider;
