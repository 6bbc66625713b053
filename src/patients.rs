//! Patient lookup: case-insensitive name match against the patient table,
//! plus the summary shown once a patient is found.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{name_key, Patient};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Patient name is empty")]
    EmptyName,

    #[error("Patient not found: {0}")]
    NotFound(String),
}

/// Find a patient by name. Matching is exact but ignores case and
/// surrounding whitespace; the first row wins when names repeat.
pub fn find_patient<'a>(patients: &'a [Patient], name: &str) -> Result<&'a Patient, LookupError> {
    let key = name_key(name);
    if key.is_empty() {
        return Err(LookupError::EmptyName);
    }

    patients
        .iter()
        .find(|p| name_key(&p.name) == key)
        .ok_or_else(|| LookupError::NotFound(name.trim().to_string()))
}

/// Patient details as displayed after a successful lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub age: u32,
    pub weight_kg: f64,
    pub current_medications: Vec<String>,
}

impl PatientSummary {
    pub fn from_patient(patient: &Patient, today: NaiveDate) -> Self {
        Self {
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth,
            age: patient.age_on(today),
            weight_kg: patient.weight_kg,
            current_medications: patient.medication_list(),
        }
    }
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
