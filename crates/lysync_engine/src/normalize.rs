//! Record normalization.

use chrono::Utc;
use lysync_record::{EntityMapping, NormalizedRecord, RemoteRecord};
use std::collections::BTreeMap;

/// Normalizes one raw remote record against an entity mapping.
///
/// For every declared field rule the raw value is read (missing reads as
/// absent) and coerced; the result lands under the local field name.
/// Unmapped remote fields are dropped. The control fields `synced_at` and
/// `is_synced` are set unconditionally.
///
/// Never fails: a record whose coercions all fail still yields a record,
/// just one without a unique key, which reconciliation then skips.
pub fn normalize(mapping: &EntityMapping, raw: &RemoteRecord) -> NormalizedRecord {
    let mut fields = BTreeMap::new();
    for rule in &mapping.fields {
        let value = raw.get(rule.remote).and_then(|v| rule.coercion.apply(v));
        fields.insert(rule.local.to_string(), value);
    }

    let unique_key = fields
        .get(mapping.local_unique_field())
        .and_then(|v| v.as_ref())
        .and_then(|v| v.to_key_string())
        .filter(|key| !key.is_empty());

    let change_stamp = fields
        .get(mapping.local_stamp_field())
        .and_then(|v| v.as_ref())
        .and_then(|v| v.as_str())
        .map(String::from);

    NormalizedRecord {
        fields,
        unique_key,
        change_stamp,
        synced_at: Utc::now(),
        is_synced: true,
    }
}
