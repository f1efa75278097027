//! Account and transaction watchers.
//!
//! Thin specialisations of [`ConditionalAwaiter`] over a [`NetworkProvider`].

use std::sync::Arc;

use tracing::{debug, info};

use super::awaiter::ConditionalAwaiter;
use crate::domain::{AccountOnNetwork, Address, TransactionHash, TransactionOnNetwork};
use crate::error::{Result, WatcherError};
use crate::infrastructure::config::WatcherConfig;
use crate::port::NetworkProvider;

/// Waits for an account to reach an expected state.
pub struct AccountWatcher<P: ?Sized> {
    provider: Arc<P>,
    address: Address,
    awaiter: ConditionalAwaiter,
}

impl<P: NetworkProvider + ?Sized> AccountWatcher<P> {
    pub fn new(provider: Arc<P>, address: Address, config: WatcherConfig) -> Self {
        Self {
            provider,
            address,
            awaiter: ConditionalAwaiter::new(config),
        }
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Wait until the account nonce is at least `target_nonce`.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherError::ExpectedAccountStateNotReached`] when the
    /// deadline passes first, or any non-retryable provider error.
    pub async fn await_nonce(&self, target_nonce: u64) -> Result<AccountOnNetwork> {
        let account = self
            .awaiter
            .await_conditionally(
                |account: &AccountOnNetwork| account.nonce >= target_nonce,
                || self.provider.get_account(&self.address),
                |account| {
                    debug!(
                        address = %self.address,
                        nonce = account.nonce,
                        target_nonce,
                        "Polled account nonce"
                    );
                },
                |last| {
                    WatcherError::ExpectedAccountStateNotReached {
                        address: self.address.clone(),
                        target_nonce,
                        last_nonce: last.map(|a| a.nonce),
                    }
                    .into()
                },
            )
            .await?;

        info!(address = %self.address, nonce = account.nonce, "Account nonce reached");
        Ok(account)
    }

    /// Wait until `condition` holds for the account.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherError::AccountConditionNotReached`] when the deadline
    /// passes first, or any non-retryable provider error.
    pub async fn await_on_account<S>(&self, condition: S) -> Result<AccountOnNetwork>
    where
        S: Fn(&AccountOnNetwork) -> bool,
    {
        self.awaiter
            .await_conditionally(
                condition,
                || self.provider.get_account(&self.address),
                |account| {
                    debug!(
                        address = %self.address,
                        nonce = account.nonce,
                        balance = %account.balance,
                        "Polled account"
                    );
                },
                |_| {
                    WatcherError::AccountConditionNotReached {
                        address: self.address.clone(),
                    }
                    .into()
                },
            )
            .await
    }
}

/// Waits for broadcast transactions to be processed.
pub struct TransactionWatcher<P: ?Sized> {
    provider: Arc<P>,
    awaiter: ConditionalAwaiter,
}

impl<P: NetworkProvider + ?Sized> TransactionWatcher<P> {
    pub fn new(provider: Arc<P>, config: WatcherConfig) -> Self {
        Self {
            provider,
            awaiter: ConditionalAwaiter::new(config),
        }
    }

    /// Wait until `condition` holds for the transaction.
    ///
    /// A transaction the network does not know yet is retried.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherError::ExpectedTransactionStatusNotReached`] when the
    /// deadline passes first, or any non-retryable provider error.
    pub async fn await_status<S>(
        &self,
        hash: &TransactionHash,
        condition: S,
    ) -> Result<TransactionOnNetwork>
    where
        S: Fn(&TransactionOnNetwork) -> bool,
    {
        self.awaiter
            .await_conditionally(
                condition,
                || self.provider.get_transaction(hash),
                |tx| debug!(hash = %hash, status = %tx.status, "Polled transaction"),
                |last| {
                    WatcherError::ExpectedTransactionStatusNotReached {
                        hash: hash.clone(),
                        last_status: last.map(|tx| tx.status),
                    }
                    .into()
                },
            )
            .await
    }

    /// Wait until the transaction is processed and require that it succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherError::TransactionFailed`] when it completed with a
    /// status other than success, plus the errors of [`await_status`](Self::await_status).
    pub async fn await_completed(&self, hash: &TransactionHash) -> Result<TransactionOnNetwork> {
        let tx = self
            .await_status(hash, |tx| tx.status.is_completed())
            .await?;

        if !tx.status.is_successful() {
            return Err(WatcherError::TransactionFailed {
                hash: hash.clone(),
                status: tx.status,
            }
            .into());
        }

        info!(hash = %hash, "Transaction completed");
        Ok(tx)
    }
}
