//! Scoped session state shared between independently run test steps.
//!
//! One step deploys a contract and saves its address; a later step, maybe
//! in another process, loads it by name from the same scope.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::domain::{breadcrumb, Address};
use crate::error::Result;
use crate::port::Storage;

/// A storage handle bound to one scope.
#[derive(Debug, Clone)]
pub struct Session<S> {
    scope: String,
    storage: S,
}

impl<S: Storage> Session<S> {
    pub fn new(scope: impl Into<String>, storage: S) -> Self {
        Self {
            scope: scope.into(),
            storage,
        }
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Save any serializable value under `name`, replacing a previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or stored.
    pub async fn save_breadcrumb<T: Serialize>(&self, kind: &str, name: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_value(value)?;
        self.storage
            .store_breadcrumb(&self.scope, kind, name, &payload)
            .await
    }

    /// Load the value saved under `name`.
    ///
    /// # Errors
    ///
    /// Returns a not-found storage error when nothing was saved under `name`,
    /// and [`Error::Json`](crate::error::Error::Json) when the payload does not match `T`.
    pub async fn load_breadcrumb<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let payload = self.storage.load_breadcrumb(&self.scope, name).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Load every value saved with type `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::error::Error::Json) when a payload does not match `T`.
    pub async fn load_breadcrumbs<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>> {
        self.storage
            .load_breadcrumbs_by_type(&self.scope, kind)
            .await?
            .into_iter()
            .map(|payload| -> Result<T> { Ok(serde_json::from_value(payload)?) })
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error if the address cannot be stored.
    pub async fn save_address(&self, name: &str, address: &Address) -> Result<()> {
        self.save_breadcrumb(breadcrumb::ADDRESS, name, address)
            .await
    }

    /// # Errors
    ///
    /// Returns a not-found storage error when no address was saved under `name`.
    pub async fn load_address(&self, name: &str) -> Result<Address> {
        self.load_breadcrumb(name).await
    }

    /// # Errors
    ///
    /// Returns an error if the stored addresses cannot be loaded.
    pub async fn load_addresses(&self) -> Result<Vec<Address>> {
        self.load_breadcrumbs(breadcrumb::ADDRESS).await
    }

    /// Save a token identifier (e.g. `TST-a1b2c3`) under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be stored.
    pub async fn save_token(&self, name: &str, identifier: &str) -> Result<()> {
        self.save_breadcrumb(breadcrumb::TOKEN, name, &identifier)
            .await
    }

    /// # Errors
    ///
    /// Returns a not-found storage error when no token was saved under `name`.
    pub async fn load_token(&self, name: &str) -> Result<String> {
        self.load_breadcrumb(name).await
    }

    /// # Errors
    ///
    /// Returns an error if the stored tokens cannot be loaded.
    pub async fn load_tokens(&self) -> Result<Vec<String>> {
        self.load_breadcrumbs(breadcrumb::TOKEN).await
    }

    /// Append an entry to the audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized or stored.
    pub async fn audit<T: Serialize>(&self, summary: &str, payload: &T) -> Result<()> {
        let payload = serde_json::to_value(payload)?;
        self.storage.store_audit_entry(summary, &payload).await
    }

    /// Delete everything the backing store holds. Used at the end of a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing files cannot be removed.
    pub async fn destroy(&self) -> Result<()> {
        info!(scope = %self.scope, "Destroying session storage");
        self.storage.destroy().await
    }
}
