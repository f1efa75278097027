//! In-memory nonce assignment for an account sending transactions.
//!
//! Nonces are handed out by a synchronous atomic increment, so several
//! sends prepared concurrently never observe the same value.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::domain::Address;
use crate::error::Result;
use crate::port::NetworkProvider;

/// Next-nonce counter for one account.
#[derive(Debug)]
pub struct NonceTracker {
    address: Address,
    nonce: AtomicU64,
}

impl NonceTracker {
    /// Start counting from a known nonce.
    pub fn new(address: Address, nonce: u64) -> Self {
        Self {
            address,
            nonce: AtomicU64::new(nonce),
        }
    }

    /// Start counting from the nonce the network reports.
    ///
    /// # Errors
    ///
    /// Returns the provider error when the account cannot be fetched.
    pub async fn from_network<P>(provider: &P, address: Address) -> Result<Self>
    where
        P: NetworkProvider + ?Sized,
    {
        let account = provider.get_account(&address).await?;
        Ok(Self::new(address, account.nonce))
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Reload the nonce from the network, discarding local increments.
    ///
    /// # Errors
    ///
    /// Returns the provider error when the account cannot be fetched.
    pub async fn sync<P>(&self, provider: &P) -> Result<u64>
    where
        P: NetworkProvider + ?Sized,
    {
        let account = provider.get_account(&self.address).await?;
        self.nonce.store(account.nonce, Ordering::SeqCst);
        debug!(address = %self.address, nonce = account.nonce, "Synced nonce");
        Ok(account.nonce)
    }

    /// Nonce the next transaction will use.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }

    /// Take the current nonce and advance the counter.
    pub fn next(&self) -> u64 {
        self.nonce.fetch_add(1, Ordering::SeqCst)
    }
}
