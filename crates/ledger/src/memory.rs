//! In-memory reference ledger.
//!
//! `MemoryLedger` backs the keyed-store and selector-query traits with a
//! single ordered map. It exists so the record-management core can be tested
//! and embedded without an external substrate; it is not a durability layer.

use crate::store::{DocScan, KeyedStore, RangeScan, SelectorQuery};
use crate::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::ops::Bound;

/// A `BTreeMap`-backed ledger implementing [`KeyedStore`] and
/// [`SelectorQuery`].
///
/// Selector support covers the subset of the external engine's language the
/// core emits: top-level field equality over stored JSON documents. Stored
/// values that are not JSON objects never match and are skipped.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, audit entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a key is currently present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyedStore for MemoryLedger {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> StoreResult<RangeScan> {
        if !start.is_empty() && !end.is_empty() && start > end {
            return Err(StoreError::InvalidRange(format!(
                "start key {start:?} sorts after end key {end:?}"
            )));
        }

        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };

        let entries: Vec<(String, Vec<u8>)> = self
            .entries
            .range((lower, upper))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(RangeScan::from_entries(entries))
    }
}

impl SelectorQuery for MemoryLedger {
    fn query_selector(&self, selector: &serde_json::Value) -> StoreResult<DocScan> {
        let fields = selector
            .get("selector")
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| {
                StoreError::InvalidSelector(
                    "selector document must contain a \"selector\" object".into(),
                )
            })?;

        let mut matches = Vec::new();
        for (key, value) in &self.entries {
            let doc: serde_json::Value = match serde_json::from_slice(value) {
                Ok(doc) => doc,
                Err(err) => {
                    tracing::warn!(%key, "skipping non-JSON value during selector query: {err}");
                    continue;
                }
            };

            let Some(doc_fields) = doc.as_object() else {
                continue;
            };

            if fields
                .iter()
                .all(|(field, expected)| doc_fields.get(field) == Some(expected))
            {
                matches.push(value.clone());
            }
        }

        Ok(DocScan::from_docs(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        ledger.put("F1", br#"{"doctorId":"D1"}"#.to_vec()).unwrap();
        ledger.put("F2", br#"{"doctorId":"D2"}"#.to_vec()).unwrap();
        ledger.put("F3", br#"{"doctorId":"D1"}"#.to_vec()).unwrap();
        ledger
    }

    fn scan_keys(ledger: &MemoryLedger, start: &str, end: &str) -> Vec<String> {
        ledger
            .range_scan(start, end)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect()
    }

    #[test]
    fn get_returns_stored_value() {
        let ledger = seeded();
        assert_eq!(
            ledger.get("F1").unwrap(),
            Some(br#"{"doctorId":"D1"}"#.to_vec())
        );
        assert_eq!(ledger.get("missing").unwrap(), None);
    }

    #[test]
    fn put_replaces_existing_value() {
        let mut ledger = seeded();
        ledger.put("F1", b"replaced".to_vec()).unwrap();
        assert_eq!(ledger.get("F1").unwrap(), Some(b"replaced".to_vec()));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn unbounded_scan_covers_every_key_in_order() {
        let ledger = seeded();
        assert_eq!(scan_keys(&ledger, "", ""), vec!["F1", "F2", "F3"]);
    }

    #[test]
    fn scan_start_is_inclusive_and_end_is_exclusive() {
        let ledger = seeded();
        assert_eq!(scan_keys(&ledger, "F1", "F3"), vec!["F1", "F2"]);
    }

    #[test]
    fn tilde_sentinel_bounds_a_prefix_scan() {
        let mut ledger = MemoryLedger::new();
        ledger.put("AUDIT-F1-tx1", b"{}".to_vec()).unwrap();
        ledger.put("AUDIT-F1-tx2", b"{}".to_vec()).unwrap();
        // A longer form id must not bleed into the F1 range.
        ledger.put("AUDIT-F10-tx1", b"{}".to_vec()).unwrap();

        assert_eq!(
            scan_keys(&ledger, "AUDIT-F1-", "AUDIT-F1-~"),
            vec!["AUDIT-F1-tx1", "AUDIT-F1-tx2"]
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let ledger = seeded();
        assert!(matches!(
            ledger.range_scan("z", "a"),
            Err(StoreError::InvalidRange(_))
        ));
    }

    #[test]
    fn selector_matches_on_field_equality() {
        let ledger = seeded();
        let docs: Vec<Vec<u8>> = ledger
            .query_selector(&json!({"selector": {"doctorId": "D1"}}))
            .unwrap()
            .map(|doc| doc.unwrap())
            .collect();

        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn selector_without_wrapper_object_is_invalid() {
        let ledger = seeded();
        assert!(matches!(
            ledger.query_selector(&json!({"doctorId": "D1"})),
            Err(StoreError::InvalidSelector(_))
        ));
    }

    #[test]
    fn selector_skips_documents_missing_the_field() {
        let mut ledger = seeded();
        ledger.put("other", br#"{"kind":"note"}"#.to_vec()).unwrap();

        let docs: Vec<Vec<u8>> = ledger
            .query_selector(&json!({"selector": {"doctorId": "D2"}}))
            .unwrap()
            .map(|doc| doc.unwrap())
            .collect();

        assert_eq!(docs, vec![br#"{"doctorId":"D2"}"#.to_vec()]);
    }
}
