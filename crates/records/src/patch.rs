//! The closed partial-update document.

use crate::form::{Diagnosis, FollowUp, Treatment};
use crate::WireError;
use serde::Deserialize;
use serde_json::Value;

/// A partial update to a diagnosis record: one optional slot per mutable
/// field.
///
/// Decoding is strict per field — a recognized field whose value does not
/// decode into its structured type is an error, never a silent skip. Keys
/// outside the mutable field set are ignored, and the identity fields
/// (`formId`, `doctorId`, `patientId`, `timestamp`) are deliberately not
/// part of this type: a patch can never move a record or change what its
/// integrity tag covers.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default)]
    pub diagnosis: Option<Diagnosis>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    #[serde(default)]
    pub treatment: Option<Treatment>,
    #[serde(default)]
    pub follow_up: Option<FollowUp>,
    #[serde(default)]
    pub lab_results: Option<Value>,
    #[serde(default)]
    pub physical_exam: Option<Value>,
}

impl RecordPatch {
    /// Decodes a patch from caller-supplied JSON text.
    pub fn from_json(data: &str) -> Result<Self, WireError> {
        serde_json::from_str(data).map_err(WireError::DecodePatch)
    }

    /// Decodes a patch from an already-parsed JSON document.
    pub fn from_value(doc: &Value) -> Result<Self, WireError> {
        Self::deserialize(doc).map_err(WireError::DecodePatch)
    }

    /// Whether the patch carries no recognized field at all.
    pub fn is_empty(&self) -> bool {
        self.diagnosis.is_none()
            && self.symptoms.is_none()
            && self.treatment.is_none()
            && self.follow_up.is_none()
            && self.lab_results.is_none()
            && self.physical_exam.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_recognized_fields() {
        let patch = RecordPatch::from_json(
            r#"{"symptoms":["fever","cough"],"diagnosis":{"primary":"Flu","icdCodes":[]}}"#,
        )
        .unwrap();

        assert_eq!(
            patch.symptoms,
            Some(vec!["fever".to_string(), "cough".to_string()])
        );
        assert_eq!(patch.diagnosis.unwrap().primary, "Flu");
        assert!(patch.treatment.is_none());
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let patch = RecordPatch::from_json(r#"{"doctorName":"Dr. X","notes":"hi"}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn malformed_recognized_field_is_an_error() {
        // The original silently skipped a diagnosis that failed to decode;
        // here it must be rejected outright.
        assert!(matches!(
            RecordPatch::from_json(r#"{"diagnosis":"not an object"}"#),
            Err(WireError::DecodePatch(_))
        ));
    }

    #[test]
    fn non_string_symptom_elements_are_an_error() {
        assert!(matches!(
            RecordPatch::from_json(r#"{"symptoms":["fever",42]}"#),
            Err(WireError::DecodePatch(_))
        ));
    }

    #[test]
    fn opaque_payloads_accept_any_json_shape() {
        let patch =
            RecordPatch::from_json(r#"{"labResults":{"wbc":11.2},"physicalExam":[1,2,3]}"#)
                .unwrap();

        assert_eq!(patch.lab_results, Some(json!({"wbc": 11.2})));
        assert_eq!(patch.physical_exam, Some(json!([1, 2, 3])));
    }

    #[test]
    fn from_value_matches_from_json() {
        let doc = json!({"symptoms": ["fever"]});
        let patch = RecordPatch::from_value(&doc).unwrap();
        assert_eq!(patch.symptoms, Some(vec!["fever".to_string()]));
    }

    #[test]
    fn null_fields_count_as_absent() {
        let patch = RecordPatch::from_json(r#"{"symptoms":null,"labResults":null}"#).unwrap();
        assert!(patch.is_empty());
    }
}
