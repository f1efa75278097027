use thiserror::Error;

use crate::domain::{Address, TransactionHash, TransactionStatus};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors reported by a network provider.
///
/// The "not found" kinds are expected while a freshly funded account or a
/// freshly broadcast transaction propagates, so watchers retry them.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("account not found: {address}")]
    AccountNotFound { address: Address },

    #[error("transaction not found: {hash}")]
    TransactionNotFound { hash: TransactionHash },

    #[error("network unavailable: {0}")]
    Unavailable(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Storage errors with a distinguishable meaning to callers.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("breadcrumb '{name}' not found in scope '{scope}'")]
    BreadcrumbNotFound { scope: String, name: String },

    #[error("interaction {id} not found")]
    InteractionNotFound { id: i64 },

    #[error("storage at {path} has been destroyed")]
    Destroyed { path: String },
}

/// Failures of a watcher whose condition was never observed.
#[derive(Error, Debug, Clone)]
pub enum WatcherError {
    #[error(
        "expected account state not reached: {address} nonce {last_nonce:?}, wanted >= {target_nonce}"
    )]
    ExpectedAccountStateNotReached {
        address: Address,
        target_nonce: u64,
        last_nonce: Option<u64>,
    },

    #[error("expected account condition not reached: {address}")]
    AccountConditionNotReached { address: Address },

    #[error("expected transaction status not reached: {hash} (last status {last_status:?})")]
    ExpectedTransactionStatusNotReached {
        hash: TransactionHash,
        last_status: Option<TransactionStatus>,
    },

    #[error("transaction {hash} completed with status {status}")]
    TransactionFailed {
        hash: TransactionHash,
        status: TransactionStatus,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Watcher(#[from] WatcherError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classifies errors that a polling loop may swallow and retry.
pub trait Retryable {
    /// True when the error is an expected, transient condition.
    fn is_retryable(&self) -> bool;
}

impl Retryable for NetworkError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            NetworkError::AccountNotFound { .. }
                | NetworkError::TransactionNotFound { .. }
                | NetworkError::Unavailable(_)
        )
    }
}

impl Retryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl Error {
    /// True when this is a missing-breadcrumb lookup rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Storage(StorageError::BreadcrumbNotFound { .. })
        )
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kinds_are_retryable() {
        let err: Error = NetworkError::AccountNotFound {
            address: Address::new("erd1alice"),
        }
        .into();
        assert!(err.is_retryable());

        let err: Error = NetworkError::Unavailable("502".into()).into();
        assert!(err.is_retryable());
    }

    #[test]
    fn other_kinds_propagate() {
        assert!(!Error::from(NetworkError::Rejected("bad nonce".into())).is_retryable());
        assert!(!Error::Database("locked".into()).is_retryable());
        assert!(!Error::Parse("nope".into()).is_retryable());
    }

    #[test]
    fn breadcrumb_not_found_is_distinguishable() {
        let err: Error = StorageError::BreadcrumbNotFound {
            scope: "s".into(),
            name: "contract".into(),
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "breadcrumb 'contract' not found in scope 's'"
        );
        assert!(!Error::Database("x".into()).is_not_found());
    }
}
