//! Tracked contract interactions with before/after account snapshots.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::session::Session;
use super::watcher::TransactionWatcher;
use crate::domain::{
    AccountSnapshot, Address, InteractionCall, InteractionRef, TransactionHash,
    TransactionOnNetwork,
};
use crate::error::Result;
use crate::infrastructure::config::WatcherConfig;
use crate::port::{NetworkProvider, Storage};

/// A tracked call after its outcome was recorded.
#[derive(Debug, Clone)]
pub struct TrackedInteraction {
    pub reference: InteractionRef,
    pub transaction: TransactionOnNetwork,
}

/// Records each contract call together with the caller's account state
/// immediately before and after it.
pub struct InteractionTracker<P: ?Sized, S> {
    provider: Arc<P>,
    session: Session<S>,
    watcher: TransactionWatcher<P>,
}

impl<P, S> InteractionTracker<P, S>
where
    P: NetworkProvider + ?Sized,
    S: Storage,
{
    pub fn new(provider: Arc<P>, session: Session<S>, config: WatcherConfig) -> Self {
        Self {
            watcher: TransactionWatcher::new(provider.clone(), config),
            provider,
            session,
        }
    }

    async fn snapshot(&self, address: &Address) -> Result<AccountSnapshot> {
        let account = self.provider.get_account(address).await?;
        let tokens = self.provider.get_tokens(address).await?;
        Ok(AccountSnapshot::capture(account, tokens))
    }

    /// Run `send`, wait for the transaction and record the interaction.
    ///
    /// Both snapshots are taken before anything is written, so nothing is
    /// stored unless the transaction succeeded and the account could be read
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns the error of the send, of the wait (including a failed
    /// transaction), or of the storage.
    pub async fn track<F, Fut>(&self, call: InteractionCall, send: F) -> Result<TrackedInteraction>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TransactionHash>>,
    {
        let user = call.user_address.clone();
        let before = self.snapshot(&user).await?;

        let hash = send().await?;
        let transaction = self.watcher.await_completed(&hash).await?;
        let after = self.snapshot(&user).await?;

        let action = call.action.clone();
        let interaction = call.into_interaction(&transaction);
        let storage = self.session.storage();
        let scope = self.session.scope();

        let reference = storage.store_interaction(scope, &interaction).await?;
        storage
            .store_account_snapshot(scope, &before.before(reference))
            .await?;
        storage
            .store_account_snapshot(scope, &after.after(reference))
            .await?;

        info!(%action, hash = %hash, %reference, "Tracked interaction");
        Ok(TrackedInteraction {
            reference,
            transaction,
        })
    }

    /// Attach an output computed after the interaction was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference does not resolve.
    pub async fn set_output(&self, reference: InteractionRef, output: &Value) -> Result<()> {
        self.session
            .storage()
            .update_interaction_set_output(reference, output)
            .await
    }
}
