//! Database model types for Diesel ORM.
//!
//! JSON values are stored as TEXT and integers wider than the network's
//! needs as BIGINT; conversion to domain types lives in the store.

use diesel::prelude::*;

use super::schema::{account_snapshots, audit_entries, breadcrumbs, interactions};

/// Database row for a breadcrumb (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = breadcrumbs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BreadcrumbRow {
    pub id: i64,
    pub scope: String,
    pub kind: String,
    pub name: String,
    pub payload: String,
}

/// Database row for a breadcrumb (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = breadcrumbs)]
pub struct NewBreadcrumbRow {
    pub scope: String,
    pub kind: String,
    pub name: String,
    pub payload: String,
}

/// Database row for an interaction (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = interactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InteractionRow {
    pub id: i64,
    pub scope: String,
    pub action: String,
    pub user_address: String,
    pub contract_address: String,
    pub transaction_hash: String,
    pub timestamp: i64,
    pub round: i64,
    pub epoch: i64,
    pub block_nonce: i64,
    pub hyperblock_nonce: i64,
    pub input: String,
    pub transfers: String,
    pub output: String,
}

/// Database row for an interaction (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = interactions)]
pub struct NewInteractionRow {
    pub scope: String,
    pub action: String,
    pub user_address: String,
    pub contract_address: String,
    pub transaction_hash: String,
    pub timestamp: i64,
    pub round: i64,
    pub epoch: i64,
    pub block_nonce: i64,
    pub hyperblock_nonce: i64,
    pub input: String,
    pub transfers: String,
    pub output: String,
}

/// Database row for an account snapshot (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = account_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountSnapshotRow {
    pub id: i64,
    pub scope: String,
    pub timestamp: String,
    pub address: String,
    pub nonce: i64,
    pub balance: String,
    pub tokens: String,
    pub taken_before_interaction: Option<i64>,
    pub taken_after_interaction: Option<i64>,
}

/// Database row for an account snapshot (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = account_snapshots)]
pub struct NewAccountSnapshotRow {
    pub scope: String,
    pub timestamp: String,
    pub address: String,
    pub nonce: i64,
    pub balance: String,
    pub tokens: String,
    pub taken_before_interaction: Option<i64>,
    pub taken_after_interaction: Option<i64>,
}

/// Database row for an audit entry (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = audit_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEntryRow {
    pub id: i64,
    pub summary: String,
    pub payload: String,
}

/// Database row for an audit entry (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = audit_entries)]
pub struct NewAuditEntryRow {
    pub summary: String,
    pub payload: String,
}
