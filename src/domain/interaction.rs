//! Tracked contract interactions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::{Address, InteractionRef, TransactionHash};
use super::transaction::TransactionOnNetwork;

/// One token movement attached to a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub identifier: String,
    #[serde(default)]
    pub nonce: u64,
    pub amount: String,
}

/// Native value plus token movements attached to a call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transfers {
    /// Native amount in the smallest denomination.
    pub value: String,
    #[serde(default)]
    pub tokens: Vec<TokenTransfer>,
}

impl Transfers {
    /// A call carrying no value and no tokens.
    #[must_use]
    pub fn none() -> Self {
        Self {
            value: "0".to_string(),
            tokens: Vec::new(),
        }
    }
}

/// Everything recorded about a single on-chain call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Endpoint or function name.
    pub action: String,
    pub user_address: Address,
    pub contract_address: Address,
    pub transaction_hash: TransactionHash,
    pub timestamp: u64,
    pub round: u64,
    pub epoch: u64,
    pub block_nonce: u64,
    pub hyperblock_nonce: u64,
    pub input: Value,
    pub transfers: Transfers,
    pub output: Value,
}

/// Caller-supplied description of a call, before its outcome is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionCall {
    pub action: String,
    pub user_address: Address,
    pub contract_address: Address,
    pub input: Value,
    pub transfers: Transfers,
}

impl InteractionCall {
    /// Combine the call with the completed transaction into a record body.
    ///
    /// The output starts as the transaction status and VM return message.
    #[must_use]
    pub fn into_interaction(self, transaction: &TransactionOnNetwork) -> Interaction {
        Interaction {
            action: self.action,
            user_address: self.user_address,
            contract_address: self.contract_address,
            transaction_hash: transaction.hash.clone(),
            timestamp: transaction.timestamp,
            round: transaction.round,
            epoch: transaction.epoch,
            block_nonce: transaction.block_nonce,
            hyperblock_nonce: transaction.hyperblock_nonce,
            input: self.input,
            transfers: self.transfers,
            output: serde_json::json!({
                "status": transaction.status.as_str(),
                "returnMessage": transaction.return_message,
            }),
        }
    }
}

/// An interaction as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub reference: InteractionRef,
    pub scope: String,
    pub interaction: Interaction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionStatus;

    #[test]
    fn into_interaction_copies_block_coordinates() {
        let mut tx = TransactionOnNetwork::new("abc".into(), TransactionStatus::Fail);
        tx.round = 10;
        tx.epoch = 2;
        tx.block_nonce = 9;
        tx.hyperblock_nonce = 8;
        tx.timestamp = 1_700_000_000;
        tx.return_message = Some("insufficient funds".into());

        let call = InteractionCall {
            action: "deposit".into(),
            user_address: "erd1alice".into(),
            contract_address: "erd1contract".into(),
            input: serde_json::json!([1, 2]),
            transfers: Transfers::none(),
        };

        let interaction = call.into_interaction(&tx);
        assert_eq!(interaction.transaction_hash.as_str(), "abc");
        assert_eq!(interaction.round, 10);
        assert_eq!(interaction.epoch, 2);
        assert_eq!(interaction.block_nonce, 9);
        assert_eq!(interaction.hyperblock_nonce, 8);
        assert_eq!(interaction.timestamp, 1_700_000_000);
        assert_eq!(interaction.output["status"], "fail");
        assert_eq!(interaction.output["returnMessage"], "insufficient funds");
    }
}
