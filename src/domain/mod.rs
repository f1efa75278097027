//! Network-agnostic domain types: accounts, transactions and the records
//! kept about a test session.

mod account;
mod audit;
pub mod breadcrumb;
mod id;
mod interaction;
mod snapshot;
mod transaction;

pub use account::{AccountOnNetwork, TokenBalance};
pub use audit::AuditEntryRecord;
pub use id::{Address, InteractionRef, TransactionHash};
pub use interaction::{Interaction, InteractionCall, InteractionRecord, TokenTransfer, Transfers};
pub use snapshot::{AccountSnapshot, AccountSnapshotRecord};
pub use transaction::{TransactionOnNetwork, TransactionStatus};
