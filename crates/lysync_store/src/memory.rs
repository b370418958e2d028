//! In-memory entity store.

use crate::entity::LocalEntity;
use crate::error::{StoreError, StoreResult};
use crate::store::{EntityStore, StampSnapshot};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

type Table = HashMap<String, LocalEntity>;

#[derive(Debug, Default)]
struct Tables {
    /// State as of the last successful commit.
    committed: HashMap<String, Table>,
    /// Mutations staged since then; reads see this overlay first.
    staged: HashMap<String, Table>,
}

/// An in-memory entity store.
///
/// Stages mutations in an overlay on top of the committed state, so
/// `commit` / `rollback` have real transactional behavior. Suitable for:
/// - Unit and integration tests
/// - Dry-run mirrors that never touch a database
///
/// Failure injection setters let tests exercise the engine's per-record
/// isolation and commit-failure paths.
///
/// # Thread Safety
///
/// Thread-safe; a run still assumes it is the only writer while it
/// mutates, per the [`EntityStore`] contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_next_commit: AtomicBool,
    fail_keys: RwLock<HashSet<String>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `commit` fail (once).
    pub fn set_fail_next_commit(&self, fail: bool) {
        self.fail_next_commit.store(fail, Ordering::SeqCst);
    }

    /// Makes any insert or update of `key` fail, simulating a row-level
    /// constraint violation.
    pub fn set_fail_on_key(&self, key: impl Into<String>) {
        self.fail_keys.write().insert(key.into());
    }

    /// Number of committed entities for a kind.
    pub fn committed_len(&self, kind: &str) -> usize {
        self.tables
            .read()
            .committed
            .get(kind)
            .map(|t| t.len())
            .unwrap_or(0)
    }

    /// Returns a committed entity, ignoring staged mutations.
    pub fn committed(&self, kind: &str, unique_key: &str) -> Option<LocalEntity> {
        self.tables
            .read()
            .committed
            .get(kind)
            .and_then(|t| t.get(unique_key))
            .cloned()
    }

    /// Number of staged (uncommitted) mutations for a kind.
    pub fn staged_len(&self, kind: &str) -> usize {
        self.tables
            .read()
            .staged
            .get(kind)
            .map(|t| t.len())
            .unwrap_or(0)
    }

    fn check_injected(&self, key: &str) -> StoreResult<()> {
        if self.fail_keys.read().contains(key) {
            return Err(StoreError::Backend(format!(
                "injected failure for key {key:?}"
            )));
        }
        Ok(())
    }

    fn exists(tables: &Tables, kind: &str, key: &str) -> bool {
        tables
            .staged
            .get(kind)
            .is_some_and(|t| t.contains_key(key))
            || tables
                .committed
                .get(kind)
                .is_some_and(|t| t.contains_key(key))
    }
}

impl EntityStore for MemoryStore {
    fn stamp_snapshot(&self, kind: &str) -> StoreResult<StampSnapshot> {
        let tables = self.tables.read();
        let mut snapshot = StampSnapshot::new();
        if let Some(table) = tables.committed.get(kind) {
            for (key, entity) in table {
                snapshot.insert(key.clone(), entity.change_stamp.clone());
            }
        }
        if let Some(table) = tables.staged.get(kind) {
            for (key, entity) in table {
                snapshot.insert(key.clone(), entity.change_stamp.clone());
            }
        }
        Ok(snapshot)
    }

    fn get(&self, kind: &str, unique_key: &str) -> StoreResult<Option<LocalEntity>> {
        let tables = self.tables.read();
        if let Some(entity) = tables.staged.get(kind).and_then(|t| t.get(unique_key)) {
            return Ok(Some(entity.clone()));
        }
        Ok(tables
            .committed
            .get(kind)
            .and_then(|t| t.get(unique_key))
            .cloned())
    }

    fn insert(&self, kind: &str, entity: LocalEntity) -> StoreResult<()> {
        self.check_injected(&entity.unique_key)?;
        let mut tables = self.tables.write();
        if Self::exists(&tables, kind, &entity.unique_key) {
            return Err(StoreError::DuplicateKey {
                kind: kind.to_string(),
                key: entity.unique_key,
            });
        }
        tables
            .staged
            .entry(kind.to_string())
            .or_default()
            .insert(entity.unique_key.clone(), entity);
        Ok(())
    }

    fn update(&self, kind: &str, entity: LocalEntity) -> StoreResult<()> {
        self.check_injected(&entity.unique_key)?;
        let mut tables = self.tables.write();
        if !Self::exists(&tables, kind, &entity.unique_key) {
            return Err(StoreError::NotFound {
                kind: kind.to_string(),
                key: entity.unique_key,
            });
        }
        tables
            .staged
            .entry(kind.to_string())
            .or_default()
            .insert(entity.unique_key.clone(), entity);
        Ok(())
    }

    fn commit(&self) -> StoreResult<()> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(StoreError::CommitFailed("injected commit failure".into()));
        }
        let mut tables = self.tables.write();
        let staged = std::mem::take(&mut tables.staged);
        for (kind, table) in staged {
            tables.committed.entry(kind).or_default().extend(table);
        }
        Ok(())
    }

    fn rollback(&self) -> StoreResult<()> {
        self.tables.write().staged.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn entity(key: &str, stamp: Option<&str>) -> LocalEntity {
        let now = Utc::now();
        LocalEntity {
            unique_key: key.to_string(),
            fields: BTreeMap::new(),
            change_stamp: stamp.map(String::from),
            synced_at: now,
            created_at: now,
            updated_at: now,
            is_synced: true,
        }
    }

    #[test]
    fn staged_mutations_visible_before_commit() {
        let store = MemoryStore::new();
        store.insert("alunos", entity("a", None)).unwrap();

        assert!(store.get("alunos", "a").unwrap().is_some());
        assert_eq!(store.committed_len("alunos"), 0);
        assert_eq!(store.staged_len("alunos"), 1);
    }

    #[test]
    fn commit_promotes_staged() {
        let store = MemoryStore::new();
        store.insert("alunos", entity("a", Some("S1"))).unwrap();
        store.commit().unwrap();

        assert_eq!(store.committed_len("alunos"), 1);
        assert_eq!(store.staged_len("alunos"), 0);
        assert_eq!(
            store.committed("alunos", "a").unwrap().change_stamp,
            Some("S1".into())
        );
    }

    #[test]
    fn rollback_discards_staged() {
        let store = MemoryStore::new();
        store.insert("alunos", entity("a", None)).unwrap();
        store.commit().unwrap();

        store.insert("alunos", entity("b", None)).unwrap();
        store.rollback().unwrap();

        assert_eq!(store.committed_len("alunos"), 1);
        assert!(store.get("alunos", "b").unwrap().is_none());
    }

    #[test]
    fn duplicate_insert_rejected() {
        let store = MemoryStore::new();
        store.insert("alunos", entity("a", None)).unwrap();
        let err = store.insert("alunos", entity("a", None)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[test]
    fn update_of_missing_row_rejected() {
        let store = MemoryStore::new();
        let err = store.update("alunos", entity("ghost", None)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn snapshot_merges_staged_over_committed() {
        let store = MemoryStore::new();
        store.insert("alunos", entity("a", Some("S1"))).unwrap();
        store.commit().unwrap();
        store.update("alunos", entity("a", Some("S2"))).unwrap();
        store.insert("alunos", entity("b", None)).unwrap();

        let snapshot = store.stamp_snapshot("alunos").unwrap();
        assert_eq!(snapshot.get("a"), Some(&Some("S2".into())));
        assert_eq!(snapshot.get("b"), Some(&None));
    }

    #[test]
    fn injected_commit_failure_fires_once() {
        let store = MemoryStore::new();
        store.set_fail_next_commit(true);
        assert!(matches!(
            store.commit().unwrap_err(),
            StoreError::CommitFailed(_)
        ));
        store.commit().unwrap();
    }

    #[test]
    fn injected_key_failure() {
        let store = MemoryStore::new();
        store.set_fail_on_key("bad");
        assert!(matches!(
            store.insert("alunos", entity("bad", None)).unwrap_err(),
            StoreError::Backend(_)
        ));
        store.insert("alunos", entity("good", None)).unwrap();
    }

    #[test]
    fn kinds_are_isolated() {
        let store = MemoryStore::new();
        store.insert("alunos", entity("a", None)).unwrap();
        store.insert("cursos", entity("a", None)).unwrap();
        store.commit().unwrap();

        assert_eq!(store.committed_len("alunos"), 1);
        assert_eq!(store.committed_len("cursos"), 1);
    }
}
