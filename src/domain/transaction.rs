//! Transaction status as reported by the network.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::TransactionHash;

/// Processing status of a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Received by the network but not yet executed.
    Pending,
    /// Executed successfully.
    Success,
    /// Executed and failed (e.g. a contract error).
    Fail,
    /// Rejected before execution.
    Invalid,
}

impl TransactionStatus {
    /// True once the network will not change the status anymore.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    #[must_use]
    pub fn is_successful(&self) -> bool {
        matches!(self, TransactionStatus::Success)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Fail => "fail",
            TransactionStatus::Invalid => "invalid",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction as fetched back from the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOnNetwork {
    pub hash: TransactionHash,
    pub status: TransactionStatus,
    /// Block timestamp, seconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub round: u64,
    #[serde(default)]
    pub epoch: u64,
    #[serde(default)]
    pub block_nonce: u64,
    #[serde(default)]
    pub hyperblock_nonce: u64,
    /// Message attached by the VM on failure, if any.
    #[serde(default)]
    pub return_message: Option<String>,
}

impl TransactionOnNetwork {
    pub fn new(hash: TransactionHash, status: TransactionStatus) -> Self {
        Self {
            hash,
            status,
            timestamp: 0,
            round: 0,
            epoch: 0,
            block_nonce: 0,
            hyperblock_nonce: 0,
            return_message: None,
        }
    }
}
