//! Entity store trait definition.

use crate::entity::LocalEntity;
use crate::error::StoreResult;
use std::collections::HashMap;

/// A `{unique_key: change_stamp}` snapshot of one entity kind.
///
/// Loaded once at the start of an incremental run; a stale or missing
/// entry only costs a redundant (idempotent) update, never a wrong result.
pub type StampSnapshot = HashMap<String, Option<String>>;

/// The store the reconciliation engine mutates through.
///
/// Implementations stage `insert`/`update` mutations until `commit`
/// persists them all atomically; `rollback` discards them all. The
/// engine assumes exclusive ownership of the store for the duration of a
/// run: reads between mutations observe the staged state.
///
/// # Invariants
///
/// - `insert` of an existing key fails with
///   [`StoreError::DuplicateKey`](crate::StoreError::DuplicateKey)
/// - `update` of a missing key fails with
///   [`StoreError::NotFound`](crate::StoreError::NotFound)
/// - after `commit` returns an error, the store content is what the last
///   successful `commit` left (nothing from the failed batch survives)
/// - entities are never deleted (remote deletions are not mirrored)
///
/// # Implementors
///
/// - [`super::MemoryStore`] - staged/committed overlay for tests and dry
///   runs
/// - A relational backend, outside this workspace
pub trait EntityStore: Send + Sync {
    /// Bulk key/stamp read for one entity kind, restricted to the key and
    /// stamp columns.
    fn stamp_snapshot(&self, kind: &str) -> StoreResult<StampSnapshot>;

    /// Point lookup by unique key.
    fn get(&self, kind: &str, unique_key: &str) -> StoreResult<Option<LocalEntity>>;

    /// Stages the insert of a new entity.
    fn insert(&self, kind: &str, entity: LocalEntity) -> StoreResult<()>;

    /// Stages an update of an existing entity.
    fn update(&self, kind: &str, entity: LocalEntity) -> StoreResult<()>;

    /// Durably persists all staged mutations as one transaction.
    fn commit(&self) -> StoreResult<()>;

    /// Discards all staged mutations.
    fn rollback(&self) -> StoreResult<()>;
}
