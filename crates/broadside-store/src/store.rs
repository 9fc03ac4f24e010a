//! The `MatchStore` trait — the durable-store contract.
//!
//! Broadside does not implement storage itself; a deployment provides
//! whatever document store it uses (MongoDB, Postgres JSONB, a test
//! double) behind this trait. The persistence layer only ever uses
//! these six operations.

use broadside_types::{AccountId, GameKey};

use crate::{AccountRecord, MatchRecord, ShotEntry, StoreError};

/// Read/write operations on the durable account and match records.
///
/// `Send + Sync + 'static` because implementations are shared across
/// the per-match recorder tasks behind an `Arc`.
pub trait MatchStore: Send + Sync + 'static {
    /// Reads an account record, `None` when the identity is unknown.
    fn load_account(
        &self,
        id: &AccountId,
    ) -> impl Future<Output = Result<Option<AccountRecord>, StoreError>> + Send;

    /// Writes an account record back, replacing the stored version.
    fn save_account(
        &self,
        record: &AccountRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Creates the durable record for a newly started match.
    fn create_match(
        &self,
        record: MatchRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Reads a match record by game key.
    fn load_match(
        &self,
        key: &GameKey,
    ) -> impl Future<Output = Result<Option<MatchRecord>, StoreError>> + Send;

    /// Appends one entry to a match record's shot log.
    fn append_shot(
        &self,
        key: &GameKey,
        shot: ShotEntry,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The single terminal update: `inProgress = false` plus the
    /// winner's display name.
    fn finish_match(
        &self,
        key: &GameKey,
        winner_username: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
