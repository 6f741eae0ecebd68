//! Predicate-query facade.
//!
//! The external query engine does the actual matching; this facade only
//! constructs the selector documents the core needs — single-field equality
//! on `doctorId` or `patientId` — and decodes the resulting documents.

use crate::error::{RecordError, RecordResult};
use dxl_ledger::SelectorQuery;
use dxl_records::DiagnosisRecord;
use serde_json::json;

/// Streams diagnosis records matching a field-equality predicate.
#[derive(Debug)]
pub struct QueryFacade<'a, Q> {
    engine: &'a Q,
}

impl<'a, Q: SelectorQuery> QueryFacade<'a, Q> {
    /// Creates a facade over the given predicate engine.
    pub fn new(engine: &'a Q) -> Self {
        Self { engine }
    }

    /// All records whose `doctorId` equals `doctor_id`.
    pub fn forms_by_doctor(&self, doctor_id: &str) -> RecordResult<Vec<DiagnosisRecord>> {
        if doctor_id.is_empty() {
            return Err(RecordError::Validation("doctorId cannot be empty".into()));
        }
        self.run(json!({"selector": {"doctorId": doctor_id}}))
    }

    /// All records whose `patientId` equals `patient_id`.
    pub fn forms_by_patient(&self, patient_id: &str) -> RecordResult<Vec<DiagnosisRecord>> {
        if patient_id.is_empty() {
            return Err(RecordError::Validation("patientId cannot be empty".into()));
        }
        self.run(json!({"selector": {"patientId": patient_id}}))
    }

    fn run(&self, selector: serde_json::Value) -> RecordResult<Vec<DiagnosisRecord>> {
        let scan = self
            .engine
            .query_selector(&selector)
            .map_err(RecordError::Query)?;

        let mut records = Vec::new();
        for doc in scan {
            let doc = doc.map_err(RecordError::Query)?;
            records.push(DiagnosisRecord::from_slice(&doc)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxl_ledger::{KeyedStore, MemoryLedger};

    fn stored_form(form_id: &str, doctor_id: &str, patient_id: &str) -> Vec<u8> {
        let record = DiagnosisRecord {
            form_id: form_id.into(),
            doctor_id: doctor_id.into(),
            patient_id: patient_id.into(),
            ..Default::default()
        };
        record.to_bytes().unwrap()
    }

    fn seeded() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        ledger.put("F1", stored_form("F1", "D1", "P1")).unwrap();
        ledger.put("F2", stored_form("F2", "D2", "P1")).unwrap();
        ledger.put("F3", stored_form("F3", "D1", "P2")).unwrap();
        ledger
    }

    #[test]
    fn by_doctor_returns_only_that_doctors_forms() {
        let ledger = seeded();
        let facade = QueryFacade::new(&ledger);

        let mut form_ids: Vec<String> = facade
            .forms_by_doctor("D1")
            .unwrap()
            .into_iter()
            .map(|r| r.form_id)
            .collect();
        form_ids.sort();

        assert_eq!(form_ids, vec!["F1", "F3"]);
    }

    #[test]
    fn by_patient_returns_only_that_patients_forms() {
        let ledger = seeded();
        let facade = QueryFacade::new(&ledger);

        let mut form_ids: Vec<String> = facade
            .forms_by_patient("P1")
            .unwrap()
            .into_iter()
            .map(|r| r.form_id)
            .collect();
        form_ids.sort();

        assert_eq!(form_ids, vec!["F1", "F2"]);
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        let ledger = seeded();
        let facade = QueryFacade::new(&ledger);

        assert!(matches!(
            facade.forms_by_doctor(""),
            Err(RecordError::Validation(_))
        ));
        assert!(matches!(
            facade.forms_by_patient(""),
            Err(RecordError::Validation(_))
        ));
    }

    #[test]
    fn no_matches_is_an_empty_list() {
        let ledger = seeded();
        let facade = QueryFacade::new(&ledger);
        assert!(facade.forms_by_doctor("D999").unwrap().is_empty());
    }
}
