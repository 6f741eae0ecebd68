//! Applies partial-update patches to existing records.

use dxl_records::{DiagnosisRecord, RecordPatch};

/// Applies `patch` onto `existing`, returning the updated record and whether
/// any field actually applied.
///
/// Pure: neither input is mutated, no metadata is stamped here. Each present
/// patch slot replaces its field wholesale — `symptoms` is never merged with
/// the old list, and the opaque payloads are taken verbatim. The identity
/// fields and server stamps are untouched by construction, since
/// [`RecordPatch`] has no slots for them.
pub fn apply_patch(existing: &DiagnosisRecord, patch: &RecordPatch) -> (DiagnosisRecord, bool) {
    let mut updated = existing.clone();
    let mut changed = false;

    if let Some(diagnosis) = &patch.diagnosis {
        updated.diagnosis = diagnosis.clone();
        changed = true;
    }
    if let Some(symptoms) = &patch.symptoms {
        updated.symptoms = symptoms.clone();
        changed = true;
    }
    if let Some(treatment) = &patch.treatment {
        updated.treatment = treatment.clone();
        changed = true;
    }
    if let Some(follow_up) = &patch.follow_up {
        updated.follow_up = follow_up.clone();
        changed = true;
    }
    if let Some(lab_results) = &patch.lab_results {
        updated.lab_results = Some(lab_results.clone());
        changed = true;
    }
    if let Some(physical_exam) = &patch.physical_exam {
        updated.physical_exam = Some(physical_exam.clone());
        changed = true;
    }

    (updated, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxl_records::Diagnosis;
    use serde_json::json;

    fn existing() -> DiagnosisRecord {
        DiagnosisRecord {
            form_id: "F1".into(),
            doctor_id: "D1".into(),
            patient_id: "P1".into(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            diagnosis: Diagnosis {
                primary: "Influenza".into(),
                ..Default::default()
            },
            symptoms: vec!["headache".into()],
            created_at: "2024-01-02T08:00:00Z".into(),
            updated_at: "2024-01-02T08:00:00Z".into(),
            ..Default::default()
        }
    }

    #[test]
    fn symptoms_are_replaced_wholesale() {
        let patch = RecordPatch {
            symptoms: Some(vec!["fever".into(), "cough".into()]),
            ..Default::default()
        };

        let (updated, changed) = apply_patch(&existing(), &patch);
        assert!(changed);
        assert_eq!(updated.symptoms, vec!["fever", "cough"]);
        // Everything else is untouched.
        assert_eq!(updated.diagnosis, existing().diagnosis);
        assert_eq!(updated.created_at, existing().created_at);
    }

    #[test]
    fn empty_patch_applies_nothing() {
        let (updated, changed) = apply_patch(&existing(), &RecordPatch::default());
        assert!(!changed);
        assert_eq!(updated, existing());
    }

    #[test]
    fn opaque_payloads_are_taken_verbatim() {
        let patch = RecordPatch {
            lab_results: Some(json!({"wbc": 11.2})),
            ..Default::default()
        };

        let (updated, changed) = apply_patch(&existing(), &patch);
        assert!(changed);
        assert_eq!(updated.lab_results, Some(json!({"wbc": 11.2})));
        assert_eq!(updated.physical_exam, None);
    }

    #[test]
    fn identity_fields_cannot_be_patched() {
        let patch = RecordPatch {
            diagnosis: Some(Diagnosis {
                primary: "Pneumonia".into(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let (updated, _) = apply_patch(&existing(), &patch);
        assert_eq!(updated.form_id, "F1");
        assert_eq!(updated.doctor_id, "D1");
        assert_eq!(updated.timestamp, "2024-01-01T00:00:00Z");
    }
}
