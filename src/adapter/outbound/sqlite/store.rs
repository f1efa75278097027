//! SQLite session store implementation.
//!
//! Persists breadcrumbs, interactions, account snapshots and the audit trail
//! using SQLite and Diesel ORM.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info};

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, enable_wal, run_migrations, DbPool, IN_MEMORY,
};
use crate::adapter::outbound::sqlite::database::model::{
    AccountSnapshotRow, AuditEntryRow, BreadcrumbRow, InteractionRow, NewAccountSnapshotRow,
    NewAuditEntryRow, NewBreadcrumbRow, NewInteractionRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    account_snapshots, audit_entries, breadcrumbs, interactions,
};
use crate::domain::{
    AccountSnapshot, AccountSnapshotRecord, Address, AuditEntryRecord, Interaction,
    InteractionRecord, InteractionRef, TransactionHash,
};
use crate::error::{Error, Result, StorageError};
use crate::infrastructure::config::StorageConfig;
use crate::port::outbound::store::Storage;

type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    id: i64,
}

struct Backend {
    path: PathBuf,
    /// `None` once the store has been destroyed.
    pool: RwLock<Option<DbPool>>,
}

/// SQLite-backed session store.
///
/// Cloning is cheap: clones share one connection pool, so every handle
/// observes [`Storage::destroy`] called through any other.
#[derive(Clone)]
pub struct SqliteStorage {
    backend: Arc<Backend>,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("path", &self.backend.path)
            .finish()
    }
}

impl SqliteStorage {
    /// Open (creating if needed) the database at `path` and apply migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created or migrations fail.
    pub fn open(path: impl AsRef<Path>, config: &StorageConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let url = path.to_string_lossy().into_owned();

        let pool = create_pool(&url, config.pool_size, config.busy_timeout_ms)?;
        if url != IN_MEMORY {
            enable_wal(&pool)?;
        }
        run_migrations(&pool)?;

        info!(path = %path.display(), "Opened session storage");

        Ok(Self {
            backend: Arc::new(Backend {
                path,
                pool: RwLock::new(Some(pool)),
            }),
        })
    }

    /// Open a private in-memory store.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created or migrations fail.
    pub fn in_memory() -> Result<Self> {
        Self::open(IN_MEMORY, &StorageConfig::default())
    }

    /// Path of the backing database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.backend.path
    }

    /// True once [`Storage::destroy`] was called through any handle.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.backend.pool.read().is_none()
    }

    /// True when both handles share one backend.
    #[must_use]
    pub fn shares_backend_with(&self, other: &SqliteStorage) -> bool {
        Arc::ptr_eq(&self.backend, &other.backend)
    }

    fn conn(&self) -> Result<SqlitePooledConnection> {
        let pool = self
            .backend
            .pool
            .read()
            .clone()
            .ok_or_else(|| StorageError::Destroyed {
                path: self.backend.path.display().to_string(),
            })?;
        Ok(pool.get()?)
    }

    /// Files making up the database: the main file and SQLite's companions.
    fn backing_files(&self) -> Vec<PathBuf> {
        let path = &self.backend.path;
        if path.as_os_str() == IN_MEMORY {
            return Vec::new();
        }
        let mut files = vec![path.clone()];
        for suffix in ["-wal", "-shm", "-journal"] {
            let mut companion = path.clone().into_os_string();
            companion.push(suffix);
            files.push(PathBuf::from(companion));
        }
        files
    }
}

fn to_json(value: &impl serde::Serialize) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn from_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

fn to_i64(field: &str, value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| Error::Parse(format!("{field} {value} exceeds i64")))
}

fn to_u64(field: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::Parse(format!("{field} {value} is negative")))
}

fn last_insert_id(conn: &mut SqliteConnection) -> QueryResult<i64> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}

fn interaction_to_row(scope: &str, interaction: &Interaction) -> Result<NewInteractionRow> {
    Ok(NewInteractionRow {
        scope: scope.to_string(),
        action: interaction.action.clone(),
        user_address: interaction.user_address.to_string(),
        contract_address: interaction.contract_address.to_string(),
        transaction_hash: interaction.transaction_hash.to_string(),
        timestamp: to_i64("timestamp", interaction.timestamp)?,
        round: to_i64("round", interaction.round)?,
        epoch: to_i64("epoch", interaction.epoch)?,
        block_nonce: to_i64("block_nonce", interaction.block_nonce)?,
        hyperblock_nonce: to_i64("hyperblock_nonce", interaction.hyperblock_nonce)?,
        input: to_json(&interaction.input)?,
        transfers: to_json(&interaction.transfers)?,
        output: to_json(&interaction.output)?,
    })
}

fn interaction_from_row(row: InteractionRow) -> Result<InteractionRecord> {
    Ok(InteractionRecord {
        reference: InteractionRef::from_id(row.id),
        scope: row.scope,
        interaction: Interaction {
            action: row.action,
            user_address: Address::from(row.user_address),
            contract_address: Address::from(row.contract_address),
            transaction_hash: TransactionHash::from(row.transaction_hash),
            timestamp: to_u64("timestamp", row.timestamp)?,
            round: to_u64("round", row.round)?,
            epoch: to_u64("epoch", row.epoch)?,
            block_nonce: to_u64("block_nonce", row.block_nonce)?,
            hyperblock_nonce: to_u64("hyperblock_nonce", row.hyperblock_nonce)?,
            input: from_json(&row.input)?,
            transfers: from_json(&row.transfers)?,
            output: from_json(&row.output)?,
        },
    })
}

fn snapshot_to_row(scope: &str, snapshot: &AccountSnapshot) -> Result<NewAccountSnapshotRow> {
    Ok(NewAccountSnapshotRow {
        scope: scope.to_string(),
        timestamp: snapshot.timestamp.to_rfc3339(),
        address: snapshot.address.to_string(),
        nonce: to_i64("nonce", snapshot.nonce)?,
        balance: snapshot.balance.clone(),
        tokens: to_json(&snapshot.tokens)?,
        taken_before_interaction: snapshot.taken_before_interaction.map(InteractionRef::id),
        taken_after_interaction: snapshot.taken_after_interaction.map(InteractionRef::id),
    })
}

fn snapshot_from_row(row: AccountSnapshotRow) -> Result<AccountSnapshotRecord> {
    let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.timestamp)
        .map_err(|e| Error::Parse(e.to_string()))?
        .with_timezone(&Utc);

    Ok(AccountSnapshotRecord {
        id: row.id,
        scope: row.scope,
        snapshot: AccountSnapshot {
            timestamp,
            address: Address::from(row.address),
            nonce: to_u64("nonce", row.nonce)?,
            balance: row.balance,
            tokens: from_json(&row.tokens)?,
            taken_before_interaction: row.taken_before_interaction.map(InteractionRef::from_id),
            taken_after_interaction: row.taken_after_interaction.map(InteractionRef::from_id),
        },
    })
}

impl Storage for SqliteStorage {
    async fn store_breadcrumb(
        &self,
        scope: &str,
        kind: &str,
        name: &str,
        payload: &Value,
    ) -> Result<()> {
        let payload = to_json(payload)?;
        let mut conn = self.conn()?;

        conn.transaction::<_, Error, _>(|conn| {
            let existing: Option<i64> = breadcrumbs::table
                .filter(breadcrumbs::scope.eq(scope))
                .filter(breadcrumbs::name.eq(name))
                .select(breadcrumbs::id)
                .first(conn)
                .optional()?;

            match existing {
                Some(id) => {
                    diesel::update(breadcrumbs::table.find(id))
                        .set((
                            breadcrumbs::kind.eq(kind),
                            breadcrumbs::payload.eq(&payload),
                        ))
                        .execute(conn)?;
                    debug!(scope, name, id, "Replaced breadcrumb");
                }
                None => {
                    diesel::insert_into(breadcrumbs::table)
                        .values(&NewBreadcrumbRow {
                            scope: scope.to_string(),
                            kind: kind.to_string(),
                            name: name.to_string(),
                            payload: payload.clone(),
                        })
                        .execute(conn)?;
                    debug!(scope, name, "Stored breadcrumb");
                }
            }
            Ok(())
        })
    }

    async fn load_breadcrumb(&self, scope: &str, name: &str) -> Result<Value> {
        let mut conn = self.conn()?;

        let row: Option<BreadcrumbRow> = breadcrumbs::table
            .filter(breadcrumbs::scope.eq(scope))
            .filter(breadcrumbs::name.eq(name))
            .select(BreadcrumbRow::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => from_json(&row.payload),
            None => Err(StorageError::BreadcrumbNotFound {
                scope: scope.to_string(),
                name: name.to_string(),
            }
            .into()),
        }
    }

    async fn load_breadcrumbs_by_type(&self, scope: &str, kind: &str) -> Result<Vec<Value>> {
        let mut conn = self.conn()?;

        let rows: Vec<BreadcrumbRow> = breadcrumbs::table
            .filter(breadcrumbs::scope.eq(scope))
            .filter(breadcrumbs::kind.eq(kind))
            .order(breadcrumbs::id.asc())
            .select(BreadcrumbRow::as_select())
            .load(&mut conn)?;

        rows.iter().map(|row| from_json(&row.payload)).collect()
    }

    async fn store_interaction(
        &self,
        scope: &str,
        interaction: &Interaction,
    ) -> Result<InteractionRef> {
        let row = interaction_to_row(scope, interaction)?;
        let mut conn = self.conn()?;

        let id = conn.transaction::<_, Error, _>(|conn| {
            diesel::insert_into(interactions::table)
                .values(&row)
                .execute(conn)?;
            Ok(last_insert_id(conn)?)
        })?;

        debug!(scope, id, action = %interaction.action, "Stored interaction");
        Ok(InteractionRef::from_id(id))
    }

    async fn update_interaction_set_output(
        &self,
        reference: InteractionRef,
        output: &Value,
    ) -> Result<()> {
        let output = to_json(output)?;
        let mut conn = self.conn()?;

        let updated = diesel::update(interactions::table.find(reference.id()))
            .set(interactions::output.eq(output))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(StorageError::InteractionNotFound { id: reference.id() }.into());
        }
        Ok(())
    }

    async fn load_interaction(&self, reference: InteractionRef) -> Result<InteractionRecord> {
        let mut conn = self.conn()?;

        let row: Option<InteractionRow> = interactions::table
            .find(reference.id())
            .select(InteractionRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(interaction_from_row)
            .transpose()?
            .ok_or_else(|| StorageError::InteractionNotFound { id: reference.id() }.into())
    }

    async fn load_interactions(&self, scope: &str) -> Result<Vec<InteractionRecord>> {
        let mut conn = self.conn()?;

        let rows: Vec<InteractionRow> = interactions::table
            .filter(interactions::scope.eq(scope))
            .order(interactions::id.asc())
            .select(InteractionRow::as_select())
            .load(&mut conn)?;

        rows.into_iter().map(interaction_from_row).collect()
    }

    async fn store_account_snapshot(&self, scope: &str, snapshot: &AccountSnapshot) -> Result<()> {
        let row = snapshot_to_row(scope, snapshot)?;
        let mut conn = self.conn()?;

        diesel::insert_into(account_snapshots::table)
            .values(&row)
            .execute(&mut conn)?;

        debug!(scope, address = %snapshot.address, nonce = snapshot.nonce, "Stored account snapshot");
        Ok(())
    }

    async fn load_account_snapshots(&self, scope: &str) -> Result<Vec<AccountSnapshotRecord>> {
        let mut conn = self.conn()?;

        let rows: Vec<AccountSnapshotRow> = account_snapshots::table
            .filter(account_snapshots::scope.eq(scope))
            .order(account_snapshots::id.asc())
            .select(AccountSnapshotRow::as_select())
            .load(&mut conn)?;

        rows.into_iter().map(snapshot_from_row).collect()
    }

    async fn store_audit_entry(&self, summary: &str, payload: &Value) -> Result<()> {
        let row = NewAuditEntryRow {
            summary: summary.to_string(),
            payload: to_json(payload)?,
        };
        let mut conn = self.conn()?;

        diesel::insert_into(audit_entries::table)
            .values(&row)
            .execute(&mut conn)?;

        debug!(summary, "Stored audit entry");
        Ok(())
    }

    async fn load_audit_entries(&self) -> Result<Vec<AuditEntryRecord>> {
        let mut conn = self.conn()?;

        let rows: Vec<AuditEntryRow> = audit_entries::table
            .order(audit_entries::id.asc())
            .select(AuditEntryRow::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| {
                Ok(AuditEntryRecord {
                    id: row.id,
                    summary: row.summary,
                    payload: from_json(&row.payload)?,
                })
            })
            .collect()
    }

    async fn destroy(&self) -> Result<()> {
        // Dropping the last pool handle closes every connection before unlinking.
        let pool = self.backend.pool.write().take();
        drop(pool);

        for file in self.backing_files() {
            match std::fs::remove_file(&file) {
                Ok(()) => debug!(file = %file.display(), "Removed storage file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        info!(path = %self.backend.path.display(), "Destroyed session storage");
        Ok(())
    }
}
