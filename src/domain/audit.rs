//! Append-only audit trail entries.

use serde_json::Value;

/// One audit entry as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntryRecord {
    pub id: i64,
    pub summary: String,
    pub payload: Value,
}
