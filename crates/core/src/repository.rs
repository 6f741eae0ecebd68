//! The diagnosis-record repository.
//!
//! `RecordRepository` owns the record lifecycle: validate → check existence
//! → stamp metadata → tag → persist → audit. It composes the integrity
//! tagger, access guard, update merger and audit trail over a caller-chosen
//! [`KeyedStore`], and each public method is one atomic unit of work under
//! the store's commit contract.
//!
//! Audit writes are best-effort by design: a failed audit write is logged
//! and never rolls back or fails the primary mutation.

use crate::access::AccessGuard;
use crate::audit::AuditTrail;
use crate::config::CoreConfig;
use crate::constants::UPDATE_AUDIT_PREFIX;
use crate::error::{RecordError, RecordResult};
use crate::{integrity, merge, validation};
use chrono::{SecondsFormat, Utc};
use dxl_ledger::{KeyedStore, TxContext};
use dxl_records::{DiagnosisRecord, RecordPatch, WireError};
use serde_json::json;
use std::sync::Arc;

/// Manages diagnosis records over a keyed store.
///
/// The repository owns its store value; use [`store`](Self::store) to run
/// read-side collaborators (such as [`crate::QueryFacade`]) against the same
/// dataset, and [`into_store`](Self::into_store) to take it back out.
#[derive(Debug)]
pub struct RecordRepository<S> {
    store: S,
    guard: AccessGuard,
    audit: AuditTrail,
}

impl<S: KeyedStore> RecordRepository<S> {
    /// Creates a repository over `store` with the given policy.
    pub fn new(store: S, config: Arc<CoreConfig>) -> Self {
        Self {
            store,
            guard: AccessGuard::new(config),
            audit: AuditTrail::new(),
        }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrows the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the repository, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Adds a new diagnosis form from caller-supplied JSON.
    ///
    /// Validates the identity fields, rejects an occupied form id, stamps
    /// `createdAt == updatedAt`, derives the integrity tag and persists the
    /// record, then records a creation audit entry (best-effort).
    ///
    /// # Errors
    ///
    /// - `Wire` when the JSON does not decode
    /// - `Validation` when `formId`, `doctorId` or `patientId` is empty, or
    ///   the form id carries the reserved audit prefix
    /// - `Conflict` when a record already exists under the form id
    pub fn add(&mut self, ctx: &TxContext, form_json: &str) -> RecordResult<()> {
        let mut record = DiagnosisRecord::from_json(form_json)?;
        validation::validate_new_form(&record)?;

        if self.store.get(&record.form_id)?.is_some() {
            return Err(RecordError::Conflict(record.form_id));
        }

        let now = now_rfc3339();
        record.created_at = now.clone();
        record.updated_at = now;
        record.signature =
            integrity::tag(&record.form_id, &record.doctor_id, &record.timestamp);

        self.store.put(&record.form_id, record.to_bytes()?)?;

        if let Err(err) = self.audit.record_creation(&mut self.store, ctx, &record) {
            tracing::warn!(
                form_id = %record.form_id,
                "failed to write creation audit entry: {err}"
            );
        }

        tracing::info!(
            form_id = %record.form_id,
            doctor_id = %record.doctor_id,
            "diagnosis form added"
        );
        Ok(())
    }

    /// Retrieves the record stored under `form_id`.
    pub fn get(&self, form_id: &str) -> RecordResult<DiagnosisRecord> {
        validation::require_form_id(form_id)?;

        let bytes = self
            .store
            .get(form_id)?
            .ok_or_else(|| RecordError::NotFound(form_id.to_string()))?;
        Ok(DiagnosisRecord::from_slice(&bytes)?)
    }

    /// Lists every stored record, in store key order.
    ///
    /// Records share the key namespace with audit entries; keys carrying the
    /// audit prefix are filtered out, and any remaining value that does not
    /// decode as a record is skipped with a warning. The order is the
    /// store's native key order and carries no meaning.
    pub fn list(&self) -> RecordResult<Vec<DiagnosisRecord>> {
        let scan = self.store.range_scan("", "")?;

        let mut records = Vec::new();
        for item in scan {
            let (key, value) = item?;
            if key.starts_with(UPDATE_AUDIT_PREFIX) {
                continue;
            }
            match DiagnosisRecord::from_slice(&value) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(%key, "skipping value that is not a diagnosis record: {err}");
                }
            }
        }
        Ok(records)
    }

    /// Applies a partial update to the record stored under `form_id`.
    ///
    /// The patch is decoded strictly into [`RecordPatch`]; recognized fields
    /// replace their counterparts wholesale, unrecognized keys are ignored.
    /// On success the record is restamped, re-tagged and persisted, and an
    /// update audit entry carrying the raw patch document is recorded
    /// (best-effort).
    ///
    /// # Errors
    ///
    /// - `NotFound` when no record exists under `form_id`
    /// - `Unauthorized` when the calling organization is not allow-listed
    /// - `Wire` when the patch is malformed JSON or a recognized field does
    ///   not decode into its structured type
    /// - `Validation` when the patch applies no recognized field
    pub fn update_selective(
        &mut self,
        ctx: &TxContext,
        form_id: &str,
        patch_json: &str,
    ) -> RecordResult<()> {
        let existing = self.get(form_id)?;
        self.guard.authorize(ctx.caller_org())?;

        let patch_doc: serde_json::Value =
            serde_json::from_str(patch_json).map_err(WireError::DecodePatch)?;
        let patch = RecordPatch::from_value(&patch_doc)?;

        let (mut updated, changed) = merge::apply_patch(&existing, &patch);
        if !changed {
            return Err(RecordError::Validation("no valid updates provided".into()));
        }

        updated.updated_at = now_rfc3339();
        updated.signature =
            integrity::tag(&updated.form_id, &updated.doctor_id, &updated.timestamp);

        self.store.put(form_id, updated.to_bytes()?)?;

        if let Err(err) = self
            .audit
            .record_update(&mut self.store, ctx, form_id, patch_doc)
        {
            tracing::warn!(%form_id, "failed to write update audit entry: {err}");
        }

        tracing::info!(%form_id, "diagnosis form updated with selective changes");
        Ok(())
    }

    /// Replaces the record stored under `form_id` wholesale.
    ///
    /// The replacement must carry the same form id and non-empty
    /// `doctorId`/`patientId`. The original `createdAt` is preserved,
    /// `updatedAt` is restamped, the tag recomputed, and an update audit
    /// entry summarizing the old and new tags recorded (best-effort).
    pub fn replace_full(
        &mut self,
        ctx: &TxContext,
        form_id: &str,
        record_json: &str,
    ) -> RecordResult<()> {
        let existing = self.get(form_id)?;
        self.guard.authorize(ctx.caller_org())?;

        let mut replacement = DiagnosisRecord::from_json(record_json)?;
        if replacement.form_id != existing.form_id {
            return Err(RecordError::Validation("formId cannot be changed".into()));
        }
        if replacement.doctor_id.is_empty() {
            return Err(RecordError::Validation("doctorId is required".into()));
        }
        if replacement.patient_id.is_empty() {
            return Err(RecordError::Validation("patientId is required".into()));
        }

        replacement.created_at = existing.created_at.clone();
        replacement.updated_at = now_rfc3339();
        replacement.signature = integrity::tag(
            &replacement.form_id,
            &replacement.doctor_id,
            &replacement.timestamp,
        );

        let summary = json!({
            "type": "complete_update",
            "previousSignature": existing.signature,
            "newSignature": replacement.signature,
        });

        self.store.put(form_id, replacement.to_bytes()?)?;

        if let Err(err) = self
            .audit
            .record_update(&mut self.store, ctx, form_id, summary)
        {
            tracing::warn!(%form_id, "failed to write update audit entry: {err}");
        }

        tracing::info!(%form_id, "diagnosis form replaced");
        Ok(())
    }

    /// Checks the stored integrity tag of `form_id`.
    ///
    /// Recomputes the expected tag from the stored `(formId, doctorId,
    /// timestamp)` triple and compares it with the stored tag. The tag does
    /// not cover clinical content, so content-only tampering is outside what
    /// this can detect.
    pub fn verify_signature(&self, form_id: &str) -> RecordResult<bool> {
        let record = self.get(form_id)?;
        let expected =
            integrity::tag(&record.form_id, &record.doctor_id, &record.timestamp);
        Ok(record.signature == expected)
    }

    /// Retrieves the full audit log for `form_id`, creation entries first.
    pub fn audit_log(&self, form_id: &str) -> RecordResult<Vec<crate::AuditEntry>> {
        self.audit.retrieve(&self.store, form_id)
    }
}

/// Current UTC time in the wire's RFC3339 second-precision form.
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
