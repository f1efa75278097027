//! Well-known breadcrumb types used by the session helpers.
//!
//! Breadcrumbs themselves are opaque JSON payloads keyed by
//! `(scope, name)`; the type only groups them for retrieval.

/// Breadcrumbs holding an account or contract [`Address`](super::Address).
pub const ADDRESS: &str = "address";

/// Breadcrumbs holding a token identifier.
pub const TOKEN: &str = "token";
