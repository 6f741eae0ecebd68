//! Append-only audit trail over the shared key namespace.
//!
//! Every successful mutating transaction leaves exactly one audit entry,
//! keyed so that all entries for one form sort and range-scan contiguously:
//!
//! ```text
//! AUDIT-CREATE-<formId>-<txId>    creation entries
//! AUDIT-<formId>-<txId>           update entries
//! ```
//!
//! Writes are best-effort from the repository's point of view: a failed
//! audit write is logged and never rolls back the primary mutation.
//! Retrieval scans both ranges for a form and returns entries in store key
//! order — lexical on transaction id, not necessarily chronological.

use crate::constants::{
    CREATION_ACTION, CREATION_AUDIT_PREFIX, RANGE_END_SENTINEL, UPDATE_AUDIT_PREFIX,
};
use crate::error::{RecordError, RecordResult};
use crate::validation;
use dxl_ledger::{KeyedStore, TxContext};
use dxl_records::DiagnosisRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One immutable audit entry, produced by exactly one mutating transaction.
///
/// The wire keys (`formID`, `txID`, `callerMSP`, ...) are shared with
/// existing datasets and must stay bit-exact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(rename = "formID")]
    pub form_id: String,
    #[serde(rename = "txID")]
    pub tx_id: String,
    /// Transaction timestamp as assigned by the invocation infrastructure.
    pub timestamp: String,
    #[serde(rename = "callerMSP")]
    pub caller_org: String,
    #[serde(flatten)]
    pub payload: AuditPayload,
}

/// What the transaction did, discriminated by the wire field `logType`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "logType")]
pub enum AuditPayload {
    /// Summary of a record creation.
    #[serde(rename = "form_creation")]
    Creation {
        #[serde(rename = "doctorID")]
        doctor_id: String,
        #[serde(rename = "patientID")]
        patient_id: String,
        /// The primary diagnosis at creation time.
        diagnosis: String,
        action: String,
    },
    /// The raw patch document or replacement summary that was applied.
    #[serde(rename = "form_update")]
    Update { updates: Value },
}

/// Writes and retrieves audit entries for diagnosis forms.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuditTrail;

impl AuditTrail {
    /// Creates a new trail handle.
    pub fn new() -> Self {
        Self
    }

    /// The store key of a creation entry.
    pub fn creation_key(form_id: &str, tx_id: &str) -> String {
        format!("{CREATION_AUDIT_PREFIX}{form_id}-{tx_id}")
    }

    /// The store key of an update entry.
    pub fn update_key(form_id: &str, tx_id: &str) -> String {
        format!("{UPDATE_AUDIT_PREFIX}{form_id}-{tx_id}")
    }

    /// Records the creation of `record` under a creation-scoped key.
    pub fn record_creation<S: KeyedStore>(
        &self,
        store: &mut S,
        ctx: &TxContext,
        record: &DiagnosisRecord,
    ) -> RecordResult<()> {
        let entry = AuditEntry {
            form_id: record.form_id.clone(),
            tx_id: ctx.tx_id().to_string(),
            timestamp: ctx.timestamp().to_string(),
            caller_org: ctx.caller_org().to_string(),
            payload: AuditPayload::Creation {
                doctor_id: record.doctor_id.clone(),
                patient_id: record.patient_id.clone(),
                diagnosis: record.diagnosis.primary.clone(),
                action: CREATION_ACTION.to_string(),
            },
        };

        let key = Self::creation_key(&record.form_id, ctx.tx_id());
        let bytes = serde_json::to_vec(&entry).map_err(RecordError::AuditSerialization)?;
        store.put(&key, bytes)?;
        Ok(())
    }

    /// Records an update under an update-scoped key.
    ///
    /// `updates` is either the raw patch document of a selective update or
    /// the old-tag/new-tag summary of a full replacement.
    pub fn record_update<S: KeyedStore>(
        &self,
        store: &mut S,
        ctx: &TxContext,
        form_id: &str,
        updates: Value,
    ) -> RecordResult<()> {
        let entry = AuditEntry {
            form_id: form_id.to_string(),
            tx_id: ctx.tx_id().to_string(),
            timestamp: ctx.timestamp().to_string(),
            caller_org: ctx.caller_org().to_string(),
            payload: AuditPayload::Update { updates },
        };

        let key = Self::update_key(form_id, ctx.tx_id());
        let bytes = serde_json::to_vec(&entry).map_err(RecordError::AuditSerialization)?;
        store.put(&key, bytes)?;
        Ok(())
    }

    /// Retrieves every audit entry for `form_id`, creation entries first.
    ///
    /// The update-scoped scan excludes creation keys: the ranges can overlap
    /// when one form's id embeds another's creation prefix, and an entry
    /// must never appear twice. Values that fail to decode are skipped with
    /// a warning rather than failing the whole retrieval.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::AuditNotFound` when no entry exists for the
    /// form, and propagates store failures.
    pub fn retrieve<S: KeyedStore>(
        &self,
        store: &S,
        form_id: &str,
    ) -> RecordResult<Vec<AuditEntry>> {
        validation::require_form_id(form_id)?;

        let mut entries = Vec::new();

        let creation_prefix = format!("{CREATION_AUDIT_PREFIX}{form_id}-");
        let scan = store.range_scan(
            &creation_prefix,
            &format!("{creation_prefix}{RANGE_END_SENTINEL}"),
        )?;
        for item in scan {
            let (key, value) = item?;
            decode_entry(&key, &value, &mut entries);
        }

        let update_prefix = format!("{UPDATE_AUDIT_PREFIX}{form_id}-");
        let scan = store.range_scan(
            &update_prefix,
            &format!("{update_prefix}{RANGE_END_SENTINEL}"),
        )?;
        for item in scan {
            let (key, value) = item?;
            if key.contains(CREATION_AUDIT_PREFIX) {
                continue;
            }
            decode_entry(&key, &value, &mut entries);
        }

        if entries.is_empty() {
            return Err(RecordError::AuditNotFound(form_id.to_string()));
        }
        Ok(entries)
    }
}

fn decode_entry(key: &str, value: &[u8], entries: &mut Vec<AuditEntry>) {
    match serde_json::from_slice::<AuditEntry>(value) {
        Ok(entry) => entries.push(entry),
        Err(err) => {
            tracing::warn!(%key, "skipping undecodable audit entry: {err}");
        }
    }
}
