//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for accounts, transactions and
//! session records so tests focus on assertions rather than construction
//! boilerplate.

use serde_json::json;

use crate::domain::{
    AccountOnNetwork, AccountSnapshot, Address, Interaction, TokenTransfer, TransactionHash,
    TransactionOnNetwork, TransactionStatus, Transfers,
};

/// Create an [`AccountOnNetwork`].
pub fn account(address: &str, nonce: u64, balance: &str) -> AccountOnNetwork {
    AccountOnNetwork::new(Address::new(address), nonce, balance)
}

/// Create a [`TransactionOnNetwork`] with zeroed block coordinates.
pub fn transaction(hash: &str, status: TransactionStatus) -> TransactionOnNetwork {
    TransactionOnNetwork::new(TransactionHash::new(hash), status)
}

/// An interaction calling `action` on a fixed contract with one token payment.
pub fn sample_interaction(action: &str) -> Interaction {
    Interaction {
        action: action.to_string(),
        user_address: Address::new("erd1alice"),
        contract_address: Address::new("erd1contract"),
        transaction_hash: TransactionHash::new("5f1e"),
        timestamp: 1_700_000_000,
        round: 120,
        epoch: 3,
        block_nonce: 118,
        hyperblock_nonce: 117,
        input: json!(["0a", 42]),
        transfers: Transfers {
            value: "0".to_string(),
            tokens: vec![TokenTransfer {
                identifier: "TST-a1b2c3".to_string(),
                nonce: 0,
                amount: "1000".to_string(),
            }],
        },
        output: json!(null),
    }
}

/// An unlinked snapshot of `address` at `nonce`.
pub fn sample_snapshot(address: &str, nonce: u64) -> AccountSnapshot {
    AccountSnapshot::capture(account(address, nonce, "1000"), Vec::new())
}
