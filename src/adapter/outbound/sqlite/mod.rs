//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed [`Storage`](crate::port::Storage)
//! implementation and the registry that shares one backend per database
//! file, using Diesel ORM.

pub mod database;
pub mod registry;
pub mod store;

pub use registry::StorageRegistry;
pub use store::SqliteStorage;
