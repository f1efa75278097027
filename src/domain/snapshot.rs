//! Point-in-time captures of account state around tracked interactions.

use chrono::{DateTime, Utc};

use super::account::{AccountOnNetwork, TokenBalance};
use super::id::{Address, InteractionRef};

/// Account state captured at one instant, optionally linked to the
/// interaction it was taken before or after.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub timestamp: DateTime<Utc>,
    pub address: Address,
    pub nonce: u64,
    pub balance: String,
    pub tokens: Vec<TokenBalance>,
    pub taken_before_interaction: Option<InteractionRef>,
    pub taken_after_interaction: Option<InteractionRef>,
}

impl AccountSnapshot {
    /// Capture an account now, unlinked.
    pub fn capture(account: AccountOnNetwork, tokens: Vec<TokenBalance>) -> Self {
        Self {
            timestamp: Utc::now(),
            address: account.address,
            nonce: account.nonce,
            balance: account.balance,
            tokens,
            taken_before_interaction: None,
            taken_after_interaction: None,
        }
    }

    #[must_use]
    pub fn before(mut self, interaction: InteractionRef) -> Self {
        self.taken_before_interaction = Some(interaction);
        self
    }

    #[must_use]
    pub fn after(mut self, interaction: InteractionRef) -> Self {
        self.taken_after_interaction = Some(interaction);
        self
    }
}

/// A snapshot as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshotRecord {
    pub id: i64,
    pub scope: String,
    pub snapshot: AccountSnapshot,
}
