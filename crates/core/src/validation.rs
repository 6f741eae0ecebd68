//! Input validation for record operations.

use crate::constants::UPDATE_AUDIT_PREFIX;
use crate::error::{RecordError, RecordResult};
use dxl_records::DiagnosisRecord;

/// Validates a form id supplied to a read or mutation.
pub(crate) fn require_form_id(form_id: &str) -> RecordResult<()> {
    if form_id.is_empty() {
        return Err(RecordError::Validation("formId cannot be empty".into()));
    }
    Ok(())
}

/// Validates a record submitted for creation.
///
/// The three identity fields must be present, and the form id must not fall
/// inside the audit key range — records and audit entries share one
/// namespace, and listing tells them apart purely by prefix.
pub(crate) fn validate_new_form(record: &DiagnosisRecord) -> RecordResult<()> {
    if record.form_id.is_empty() {
        return Err(RecordError::Validation("formId is required".into()));
    }
    if record.form_id.starts_with(UPDATE_AUDIT_PREFIX) {
        return Err(RecordError::Validation(format!(
            "formId must not begin with the reserved prefix {UPDATE_AUDIT_PREFIX}"
        )));
    }
    if record.doctor_id.is_empty() {
        return Err(RecordError::Validation("doctorId is required".into()));
    }
    if record.patient_id.is_empty() {
        return Err(RecordError::Validation("patientId is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(form_id: &str, doctor_id: &str, patient_id: &str) -> DiagnosisRecord {
        DiagnosisRecord {
            form_id: form_id.into(),
            doctor_id: doctor_id.into(),
            patient_id: patient_id.into(),
            ..DiagnosisRecord::default()
        }
    }

    #[test]
    fn complete_identities_pass() {
        assert!(validate_new_form(&minimal("F1", "D1", "P1")).is_ok());
    }

    #[test]
    fn each_missing_identity_fails() {
        assert!(validate_new_form(&minimal("", "D1", "P1")).is_err());
        assert!(validate_new_form(&minimal("F1", "", "P1")).is_err());
        assert!(validate_new_form(&minimal("F1", "D1", "")).is_err());
    }

    #[test]
    fn reserved_prefix_is_rejected() {
        let result = validate_new_form(&minimal("AUDIT-F1", "D1", "P1"));
        assert!(matches!(result, Err(RecordError::Validation(_))));
    }

    #[test]
    fn empty_form_id_lookup_fails() {
        assert!(require_form_id("").is_err());
        assert!(require_form_id("F1").is_ok());
    }
}
