//! The diagnosis-record entity and its nested clinical structures.

use crate::WireError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One medical-diagnosis record, keyed in the store by its `form_id`.
///
/// `form_id` is caller-supplied, globally unique and immutable after
/// creation. `timestamp` is the caller's clinical-event time and is treated
/// as an opaque string: it feeds the integrity tag byte-for-byte, so the
/// core never reformats it. `signature`, `created_at` and `updated_at` are
/// server-stamped; whatever a caller supplies for them is overwritten.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    #[serde(default)]
    pub form_id: String,
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: String,
    /// Clinical-event time, caller-supplied and opaque.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub diagnosis: Diagnosis,
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Opaque structured payload; schema owned by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_exam: Option<Value>,
    /// Opaque structured payload; schema owned by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_results: Option<Value>,
    #[serde(default)]
    pub treatment: Treatment,
    #[serde(default)]
    pub follow_up: FollowUp,
    /// Integrity tag over `(form_id, doctor_id, timestamp)`, server-derived.
    #[serde(default)]
    pub signature: String,
    /// Server stamp, RFC3339 UTC; set once at creation.
    #[serde(default)]
    pub created_at: String,
    /// Server stamp, RFC3339 UTC; refreshed on every successful mutation.
    #[serde(default)]
    pub updated_at: String,
}

/// Diagnosis details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    #[serde(default)]
    pub primary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<String>,
    #[serde(default)]
    pub icd_codes: Vec<String>,
}

/// Prescribed treatment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// One prescribed medication.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub duration: String,
}

/// Follow-up instructions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    /// Empty when no appointment is scheduled; omitted from the wire then.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_appointment: String,
    #[serde(default)]
    pub urgent_contact: bool,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referrals: Vec<String>,
}

impl DiagnosisRecord {
    /// Decodes a record from caller-supplied JSON text.
    pub fn from_json(data: &str) -> Result<Self, WireError> {
        serde_json::from_str(data).map_err(WireError::DecodeRecord)
    }

    /// Decodes a record from a stored value.
    pub fn from_slice(data: &[u8]) -> Result<Self, WireError> {
        serde_json::from_slice(data).map_err(WireError::DecodeRecord)
    }

    /// Encodes the record into its stored wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        serde_json::to_vec(self).map_err(WireError::EncodeRecord)
    }
}
