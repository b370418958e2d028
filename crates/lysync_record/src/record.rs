//! Records before and after normalization.

use crate::value::FieldValue;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// One raw record as the remote API delivers it.
///
/// An ordered mapping from external field name to JSON scalar. Transient:
/// it exists only between a page fetch and normalization.
pub type RemoteRecord = serde_json::Map<String, serde_json::Value>;

/// One record after normalization, ready to construct or update a local
/// entity.
///
/// Every declared field of the entity mapping is present as a key; a value
/// of `None` means the remote field was missing, null, or failed coercion.
/// The unique key and change stamp are extracted eagerly so the
/// reconciliation engine never re-derives them.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Local field name to coerced value, unique key and stamp included.
    pub fields: BTreeMap<String, Option<FieldValue>>,
    /// The unique key, if present and non-empty after coercion.
    pub unique_key: Option<String>,
    /// The remote change stamp, if present.
    pub change_stamp: Option<String>,
    /// Control field: when this record was normalized.
    pub synced_at: DateTime<Utc>,
    /// Control field: always true once normalization ran.
    pub is_synced: bool,
}

impl NormalizedRecord {
    /// Returns true if the record has a usable unique key.
    ///
    /// Records without one are unprocessable and the reconciliation engine
    /// skips them (sparse upstream rows are expected, not anomalous).
    pub fn has_unique_key(&self) -> bool {
        self.unique_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_key_presence() {
        let record = NormalizedRecord {
            fields: BTreeMap::new(),
            unique_key: Some("2024001".into()),
            change_stamp: None,
            synced_at: Utc::now(),
            is_synced: true,
        };
        assert!(record.has_unique_key());

        let keyless = NormalizedRecord {
            unique_key: None,
            ..record
        };
        assert!(!keyless.has_unique_key());
    }
}
