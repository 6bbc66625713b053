use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DosageTier, NoticeLevel};
use crate::patients::{LookupError, PatientSummary};
use crate::session::AppState;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// One line of check output, tagged with how it should be surfaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dosage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DosageRecommendation {
    pub drug: String,
    pub base_dosage_mg: f64,
    /// Adjusted dose, rounded to two decimals.
    pub recommended_dosage_mg: f64,
    pub tier: DosageTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DosageReport {
    pub recommendations: Vec<DosageRecommendation>,
    /// One notice per selected drug, in selection order.
    pub notices: Vec<Notice>,
    /// Selected drugs with no catalog row.
    pub skipped: Vec<String>,
}

// ---------------------------------------------------------------------------
// Check request & report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckRequest {
    pub patient_name: String,
    #[serde(default)]
    pub selected_drugs: Vec<String>,
    #[serde(default)]
    pub household_items: Vec<String>,
    /// Overrides the age computed from the date of birth. Clamped, so a
    /// negative entry means 0.
    #[serde(default)]
    pub age: Option<i64>,
    /// Edited weight in kilograms. Used for this check only.
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub patient: PatientSummary,
    pub checked_on: NaiveDate,
    pub age: u32,
    pub weight_kg: f64,
    pub interactions: Vec<Notice>,
    /// Present only for the patient-facing flow.
    pub household: Option<Vec<Notice>>,
    pub dosage: DosageReport,
    pub processing_time_ms: u64,
}

// ---------------------------------------------------------------------------
// CheckError
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("Enter a patient name before running checks")]
    EmptyPatientName,

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Checks are only available on the main page with a role selected")]
    NotReady,
}

impl From<LookupError> for CheckError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::EmptyName => CheckError::EmptyPatientName,
            LookupError::NotFound(name) => CheckError::PatientNotFound(name),
        }
    }
}

// ---------------------------------------------------------------------------
// DecisionSupport trait
// ---------------------------------------------------------------------------

/// Runs the interaction and dosage checks for one user action.
pub trait DecisionSupport {
    /// Run every check the session's role is entitled to, for the given day.
    fn run_check(
        &self,
        state: &AppState,
        request: &CheckRequest,
        today: NaiveDate,
    ) -> Result<CheckReport, CheckError>;
}
