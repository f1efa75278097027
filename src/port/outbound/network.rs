//! Network provider port.
//!
//! The provider is supplied by an external SDK (a proxy or node client).
//! Signing and transaction encoding happen on the SDK side; this crate only
//! sees encoded transactions, hashes and the state read back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AccountOnNetwork, Address, TokenBalance, TransactionHash, TransactionOnNetwork};
use crate::error::Result;

/// Read-only query against a contract view function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractQuery {
    pub address: Address,
    pub function: String,
    /// Hex-encoded arguments.
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// Result of a [`ContractQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractQueryResponse {
    pub return_code: String,
    /// Base64-encoded return values.
    #[serde(default)]
    pub return_data: Vec<String>,
}

/// Port for reading and writing ledger state through a network provider.
///
/// # Errors
///
/// Implementations report missing accounts and transactions with
/// [`NetworkError::AccountNotFound`](crate::error::NetworkError::AccountNotFound)
/// and [`NetworkError::TransactionNotFound`](crate::error::NetworkError::TransactionNotFound),
/// and temporary outages with
/// [`NetworkError::Unavailable`](crate::error::NetworkError::Unavailable).
/// Watchers retry exactly those kinds.
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Fetch the nonce and balance of an account.
    async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork>;

    /// Fetch the token holdings of an account.
    async fn get_tokens(&self, address: &Address) -> Result<Vec<TokenBalance>>;

    /// Broadcast an already signed and encoded transaction.
    async fn send_transaction(&self, signed: &Value) -> Result<TransactionHash>;

    /// Fetch a transaction and its processing status.
    async fn get_transaction(&self, hash: &TransactionHash) -> Result<TransactionOnNetwork>;

    /// Run a view function.
    async fn query_contract(&self, query: &ContractQuery) -> Result<ContractQueryResponse>;
}
