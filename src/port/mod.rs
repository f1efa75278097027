//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where the watcher and storage core meets the
//! outside world:
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  watchers, session,     │
//!                    │  interaction tracker    │
//!                    └─────────────────────────┘
//!                       │                   │
//!                       ▼                   ▼
//!              ┌─────────────────┐   ┌─────────────┐
//!              │ NetworkProvider │   │   Storage   │
//!              │ (external SDK)  │   │   Adapter   │
//!              └─────────────────┘   └─────────────┘
//! ```
//!
//! - [`NetworkProvider`] - account, transaction and query access to a node or proxy
//! - [`Storage`] - breadcrumbs, interactions, account snapshots and audit trail

pub mod outbound;

pub use outbound::network::{ContractQuery, ContractQueryResponse, NetworkProvider};
pub use outbound::store::Storage;
