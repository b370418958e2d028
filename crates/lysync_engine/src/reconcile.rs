//! Per-record reconciliation.

use chrono::Utc;
use lysync_record::{EntityMapping, NormalizedRecord};
use lysync_store::{EntityStore, LocalEntity, StampSnapshot, StoreResult};
use tracing::error;

/// The decision taken for one normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new local entity was staged.
    Inserted,
    /// An existing local entity was overwritten.
    Updated,
    /// No usable key, or unchanged stamp under incremental mode.
    Skipped,
    /// A store-level failure, isolated to this record.
    Errored,
}

/// Reconciles one normalized record against the store.
///
/// Decision order:
/// 1. no usable unique key - skip (sparse upstream rows are expected)
/// 2. incremental mode, key in the snapshot, stamps equal - skip
/// 3. existing entity - overwrite all mapped fields except the key and the
///    original `created_at`
/// 4. no existing entity - stage a new one with `created_at` set now
///
/// Any store failure in steps 3-4 is logged and converted to
/// [`Outcome::Errored`]; it never aborts the rest of the batch. The stamp
/// check is an optimization only: a stale snapshot falls through to step 3
/// and re-applies all fields, which is idempotent.
pub fn reconcile<S: EntityStore + ?Sized>(
    store: &S,
    mapping: &EntityMapping,
    normalized: &NormalizedRecord,
    snapshot: &StampSnapshot,
    incremental: bool,
) -> Outcome {
    let Some(key) = normalized.unique_key.as_deref() else {
        return Outcome::Skipped;
    };

    if incremental {
        if let Some(stored_stamp) = snapshot.get(key) {
            if *stored_stamp == normalized.change_stamp {
                return Outcome::Skipped;
            }
        }
    }

    match apply(store, mapping, normalized, key) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(kind = mapping.kind, key, error = %e, "record reconciliation failed");
            Outcome::Errored
        }
    }
}

fn apply<S: EntityStore + ?Sized>(
    store: &S,
    mapping: &EntityMapping,
    normalized: &NormalizedRecord,
    key: &str,
) -> StoreResult<Outcome> {
    let unique_local = mapping.local_unique_field();
    let stamp_local = mapping.local_stamp_field();

    match store.get(mapping.kind, key)? {
        Some(mut existing) => {
            for (local, value) in &normalized.fields {
                // Key and stamp live in dedicated entity slots.
                if local == unique_local || local == stamp_local {
                    continue;
                }
                existing.fields.insert(local.clone(), value.clone());
            }
            existing.change_stamp = normalized.change_stamp.clone();
            existing.synced_at = normalized.synced_at;
            existing.updated_at = normalized.synced_at;
            existing.is_synced = normalized.is_synced;
            store.update(mapping.kind, existing)?;
            Ok(Outcome::Updated)
        }
        None => {
            let mut fields = normalized.fields.clone();
            fields.remove(unique_local);
            fields.remove(stamp_local);
            let entity = LocalEntity {
                unique_key: key.to_string(),
                fields,
                change_stamp: normalized.change_stamp.clone(),
                synced_at: normalized.synced_at,
                created_at: Utc::now(),
                updated_at: normalized.synced_at,
                is_synced: normalized.is_synced,
            };
            store.insert(mapping.kind, entity)?;
            Ok(Outcome::Inserted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use lysync_record::{FieldValue, RemoteRecord};
    use lysync_store::MemoryStore;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RemoteRecord {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!("test records are objects"),
        }
    }

    fn normalized(value: serde_json::Value) -> NormalizedRecord {
        normalize(&EntityMapping::alunos(), &raw(value))
    }

    #[test]
    fn inserts_when_absent() {
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();
        let record = normalized(json!({ "aluno": "1", "serie": 2 }));

        let outcome = reconcile(&store, &mapping, &record, &StampSnapshot::new(), false);
        assert_eq!(outcome, Outcome::Inserted);

        let entity = store.get("alunos", "1").unwrap().unwrap();
        assert_eq!(entity.field("serie"), Some(&FieldValue::Int(2)));
        assert!(entity.is_synced);
    }

    #[test]
    fn updates_preserve_key_and_created_at() {
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();

        let first = normalized(json!({ "aluno": "1", "serie": 2 }));
        reconcile(&store, &mapping, &first, &StampSnapshot::new(), false);
        let created_at = store.get("alunos", "1").unwrap().unwrap().created_at;

        let second = normalized(json!({ "aluno": "1", "serie": 3 }));
        let outcome = reconcile(&store, &mapping, &second, &StampSnapshot::new(), false);
        assert_eq!(outcome, Outcome::Updated);

        let entity = store.get("alunos", "1").unwrap().unwrap();
        assert_eq!(entity.unique_key, "1");
        assert_eq!(entity.created_at, created_at);
        assert_eq!(entity.field("serie"), Some(&FieldValue::Int(3)));
        assert!(entity.updated_at >= created_at);
    }

    #[test]
    fn update_overwrites_with_absent_values() {
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();

        reconcile(
            &store,
            &mapping,
            &normalized(json!({ "aluno": "1", "curso": "ENG" })),
            &StampSnapshot::new(),
            false,
        );
        reconcile(
            &store,
            &mapping,
            &normalized(json!({ "aluno": "1" })),
            &StampSnapshot::new(),
            false,
        );

        let entity = store.get("alunos", "1").unwrap().unwrap();
        // The remote dropped the field; the mirror follows.
        assert_eq!(entity.field("curso"), None);
    }

    #[test]
    fn missing_key_skips() {
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();
        let record = normalized(json!({ "nome_compl": "Ana" }));

        let outcome = reconcile(&store, &mapping, &record, &StampSnapshot::new(), false);
        assert_eq!(outcome, Outcome::Skipped);
    }

    #[test]
    fn incremental_equal_stamp_skips() {
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();
        let record = normalized(json!({ "aluno": "1", "stamp_atualizacao": "S1" }));

        let mut snapshot = StampSnapshot::new();
        snapshot.insert("1".into(), Some("S1".into()));

        let outcome = reconcile(&store, &mapping, &record, &snapshot, true);
        assert_eq!(outcome, Outcome::Skipped);
    }

    #[test]
    fn incremental_changed_stamp_updates() {
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();

        let first = normalized(json!({ "aluno": "1", "stamp_atualizacao": "S1" }));
        reconcile(&store, &mapping, &first, &StampSnapshot::new(), false);

        let mut snapshot = StampSnapshot::new();
        snapshot.insert("1".into(), Some("S1".into()));

        let changed = normalized(json!({ "aluno": "1", "stamp_atualizacao": "S2" }));
        let outcome = reconcile(&store, &mapping, &changed, &snapshot, true);
        assert_eq!(outcome, Outcome::Updated);
        assert_eq!(
            store.get("alunos", "1").unwrap().unwrap().change_stamp,
            Some("S2".into())
        );
    }

    #[test]
    fn incremental_matching_absent_stamps_skip() {
        // The original treats two missing stamps as equal: nothing to do.
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();
        let record = normalized(json!({ "aluno": "1" }));

        let mut snapshot = StampSnapshot::new();
        snapshot.insert("1".into(), None);

        let outcome = reconcile(&store, &mapping, &record, &snapshot, true);
        assert_eq!(outcome, Outcome::Skipped);
    }

    #[test]
    fn stale_snapshot_falls_through_to_update() {
        // Entity exists in the store but not in the snapshot: the stamp
        // optimization misses and the record is re-applied idempotently.
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();
        let record = normalized(json!({ "aluno": "1", "stamp_atualizacao": "S1" }));

        reconcile(&store, &mapping, &record, &StampSnapshot::new(), false);
        let outcome = reconcile(&store, &mapping, &record, &StampSnapshot::new(), true);
        assert_eq!(outcome, Outcome::Updated);
    }

    #[test]
    fn full_mode_ignores_stamps() {
        let store = MemoryStore::new();
        let mapping = EntityMapping::alunos();
        let record = normalized(json!({ "aluno": "1", "stamp_atualizacao": "S1" }));

        reconcile(&store, &mapping, &record, &StampSnapshot::new(), false);

        let mut snapshot = StampSnapshot::new();
        snapshot.insert("1".into(), Some("S1".into()));
        let outcome = reconcile(&store, &mapping, &record, &snapshot, false);
        assert_eq!(outcome, Outcome::Updated);
    }

    #[test]
    fn store_failure_is_isolated() {
        let store = MemoryStore::new();
        store.set_fail_on_key("bad");
        let mapping = EntityMapping::alunos();

        let outcome = reconcile(
            &store,
            &mapping,
            &normalized(json!({ "aluno": "bad" })),
            &StampSnapshot::new(),
            false,
        );
        assert_eq!(outcome, Outcome::Errored);

        // The next record still goes through.
        let outcome = reconcile(
            &store,
            &mapping,
            &normalized(json!({ "aluno": "good" })),
            &StampSnapshot::new(),
            false,
        );
        assert_eq!(outcome, Outcome::Inserted);
    }
}
