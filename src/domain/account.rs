//! Account state as reported by the network.

use serde::{Deserialize, Serialize};

use super::id::Address;

/// Account state fetched from a network provider.
///
/// Balances are kept as base-10 strings of the smallest denomination, the
/// same form the proxy returns, so no precision is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOnNetwork {
    pub address: Address,
    pub nonce: u64,
    pub balance: String,
}

impl AccountOnNetwork {
    pub fn new(address: Address, nonce: u64, balance: impl Into<String>) -> Self {
        Self {
            address,
            nonce,
            balance: balance.into(),
        }
    }
}

/// Holding of one token (fungible, or one nonce of a non-fungible collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub identifier: String,
    #[serde(default)]
    pub nonce: u64,
    pub balance: String,
}

impl TokenBalance {
    pub fn fungible(identifier: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            nonce: 0,
            balance: balance.into(),
        }
    }
}
