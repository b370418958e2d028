//! The persisted local entity.

use chrono::{DateTime, Utc};
use lysync_record::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The local counterpart of one remote record.
///
/// Business attributes are dynamic (the field set comes from the entity
/// mapping, not from a struct per kind); typing lives in the coercions that
/// produced the values. A `None` value is a field the remote delivered as
/// null, omitted, or in an uncoercible shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalEntity {
    /// Primary identity. Never null, never updated after insert.
    pub unique_key: String,
    /// Optional business attributes, keyed by local field name.
    pub fields: BTreeMap<String, Option<FieldValue>>,
    /// Last known remote change stamp.
    pub change_stamp: Option<String>,
    /// Set on every successful reconciliation touch.
    pub synced_at: DateTime<Utc>,
    /// Set once, at insert. Never mutated.
    pub created_at: DateTime<Utc>,
    /// Set on every update, including no-op content updates in full-sync
    /// mode.
    pub updated_at: DateTime<Utc>,
    /// True once any successful sync has touched the row.
    pub is_synced: bool,
}

impl LocalEntity {
    /// Returns a business attribute by local field name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).and_then(|v| v.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_distinguishes_absent_and_null() {
        let mut fields = BTreeMap::new();
        fields.insert("serie".to_string(), Some(FieldValue::Int(3)));
        fields.insert("turno".to_string(), None);

        let now = Utc::now();
        let entity = LocalEntity {
            unique_key: "2024001".into(),
            fields,
            change_stamp: None,
            synced_at: now,
            created_at: now,
            updated_at: now,
            is_synced: true,
        };

        assert_eq!(entity.field("serie"), Some(&FieldValue::Int(3)));
        assert_eq!(entity.field("turno"), None);
        assert_eq!(entity.field("missing"), None);
    }
}
