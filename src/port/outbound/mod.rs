//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod network;
pub mod store;
