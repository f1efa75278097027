//! Persistence port for session state.
//!
//! Breadcrumbs are upserted by `(scope, name)`; interactions, account
//! snapshots and audit entries are append-only. Interactions are only
//! mutable through [`Storage::update_interaction_set_output`].

use std::future::Future;

use serde_json::Value;

use crate::domain::{
    AccountSnapshot, AccountSnapshotRecord, AuditEntryRecord, Interaction, InteractionRecord,
    InteractionRef,
};
use crate::error::Result;

/// Storage operations for a test session.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Each operation is its own atomic unit; nothing spans calls
/// - Nothing is retried here; storage failures are fatal to the caller
pub trait Storage: Send + Sync {
    /// Store a breadcrumb, replacing payload and type if `(scope, name)` exists.
    fn store_breadcrumb(
        &self,
        scope: &str,
        kind: &str,
        name: &str,
        payload: &Value,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Load a breadcrumb payload.
    ///
    /// Fails with [`StorageError::BreadcrumbNotFound`](crate::error::StorageError::BreadcrumbNotFound)
    /// when nothing was stored under `(scope, name)`.
    fn load_breadcrumb(&self, scope: &str, name: &str)
        -> impl Future<Output = Result<Value>> + Send;

    /// Load every breadcrumb payload of a type within a scope. Empty when none match.
    fn load_breadcrumbs_by_type(
        &self,
        scope: &str,
        kind: &str,
    ) -> impl Future<Output = Result<Vec<Value>>> + Send;

    /// Append an interaction and return a reference to it.
    fn store_interaction(
        &self,
        scope: &str,
        interaction: &Interaction,
    ) -> impl Future<Output = Result<InteractionRef>> + Send;

    /// Replace the output of an existing interaction.
    fn update_interaction_set_output(
        &self,
        reference: InteractionRef,
        output: &Value,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Load an interaction by reference.
    fn load_interaction(
        &self,
        reference: InteractionRef,
    ) -> impl Future<Output = Result<InteractionRecord>> + Send;

    /// Load all interactions of a scope in insertion order.
    fn load_interactions(
        &self,
        scope: &str,
    ) -> impl Future<Output = Result<Vec<InteractionRecord>>> + Send;

    /// Append an account snapshot.
    fn store_account_snapshot(
        &self,
        scope: &str,
        snapshot: &AccountSnapshot,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Load all account snapshots of a scope in insertion order.
    fn load_account_snapshots(
        &self,
        scope: &str,
    ) -> impl Future<Output = Result<Vec<AccountSnapshotRecord>>> + Send;

    /// Append an audit entry.
    fn store_audit_entry(
        &self,
        summary: &str,
        payload: &Value,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Load the audit trail in insertion order.
    fn load_audit_entries(&self) -> impl Future<Output = Result<Vec<AuditEntryRecord>>> + Send;

    /// Irreversibly delete all persisted state of this store.
    fn destroy(&self) -> impl Future<Output = Result<()>> + Send;
}
