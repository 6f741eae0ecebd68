//! Diagnosis-record wire models.
//!
//! This crate defines the JSON documents the DXL core stores and exchanges:
//! the [`DiagnosisRecord`] root entity with its nested clinical structures,
//! and the [`RecordPatch`] partial-update document.
//!
//! Responsibilities:
//! - Define the record wire model with its frozen camelCase field names
//! - Provide strict encode/decode helpers for store values and caller input
//! - Define the closed partial-update type consumed by the core's merger
//!
//! Notes:
//! - Every wire name here is shared with existing datasets and must not
//!   change. Absent input fields decode to their empty values, matching the
//!   permissive decode behaviour of prior writers.
//! - Validation of required identifiers is a core concern and lives with the
//!   repository, not here.

mod form;
mod patch;

pub use form::{Diagnosis, DiagnosisRecord, FollowUp, Medication, Treatment};
pub use patch::RecordPatch;

/// Errors that can occur encoding or decoding wire documents.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A diagnosis-record document failed to decode.
    #[error("failed to decode diagnosis record: {0}")]
    DecodeRecord(#[source] serde_json::Error),

    /// A diagnosis record failed to encode.
    #[error("failed to encode diagnosis record: {0}")]
    EncodeRecord(#[source] serde_json::Error),

    /// An update-patch document failed to decode.
    #[error("failed to decode update patch: {0}")]
    DecodePatch(#[source] serde_json::Error),
}
