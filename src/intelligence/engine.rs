use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::models::Role;
use crate::patients::{find_patient, PatientSummary};
use crate::reference::ClinicalReferenceData;
use crate::session::AppState;

use super::detection::{check_household_interactions, check_interactions};
use super::dosage::{recommend_dosage, DosagePolicy};
use super::helpers::{clamp_age, clamp_weight};
use super::types::{CheckError, CheckReport, CheckRequest, DecisionSupport};

/// Default implementation of the decision-support engine.
/// Holds the shared reference tables and the dosage policy.
pub struct DefaultDecisionEngine {
    pub(crate) reference: Arc<ClinicalReferenceData>,
    pub(crate) policy: DosagePolicy,
}

impl DefaultDecisionEngine {
    pub fn new(reference: Arc<ClinicalReferenceData>) -> Self {
        Self::with_policy(reference, DosagePolicy::default())
    }

    pub fn with_policy(reference: Arc<ClinicalReferenceData>, policy: DosagePolicy) -> Self {
        Self { reference, policy }
    }

    pub fn reference(&self) -> &ClinicalReferenceData {
        &self.reference
    }
}

impl DecisionSupport for DefaultDecisionEngine {
    fn run_check(
        &self,
        state: &AppState,
        request: &CheckRequest,
        today: NaiveDate,
    ) -> Result<CheckReport, CheckError> {
        if !state.can_run_checks() {
            return Err(CheckError::NotReady);
        }

        let start = Instant::now();

        let patient = find_patient(&self.reference.patients, &request.patient_name)?;
        let summary = PatientSummary::from_patient(patient, today);

        let age = request.age.map(clamp_age).unwrap_or(summary.age);
        let weight_kg = clamp_weight(request.weight_kg.unwrap_or(summary.weight_kg));

        let interactions = check_interactions(&request.selected_drugs, &self.reference);

        let household = match state.role {
            Role::Patient => Some(check_household_interactions(
                &summary.current_medications,
                &request.household_items,
                &self.reference,
            )),
            _ => None,
        };

        let dosage = recommend_dosage(
            &request.selected_drugs,
            age,
            weight_kg,
            &self.reference,
            &self.policy,
        );

        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            role = %state.role,
            drugs = request.selected_drugs.len(),
            household_items = request.household_items.len(),
            skipped = dosage.skipped.len(),
            processing_ms = processing_time_ms,
            "Check completed"
        );

        Ok(CheckReport {
            patient: summary,
            checked_on: today,
            age,
            weight_kg,
            interactions,
            household,
            dosage,
            processing_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeLevel;

    fn engine() -> DefaultDecisionEngine {
        DefaultDecisionEngine::new(Arc::new(ClinicalReferenceData::load_test()))
    }

    fn main_page(role: Role) -> AppState {
        AppState::default().select_role(role).unwrap().enter().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn request(name: &str, drugs: &[&str], items: &[&str]) -> CheckRequest {
        CheckRequest {
            patient_name: name.into(),
            selected_drugs: drugs.iter().map(|s| s.to_string()).collect(),
            household_items: items.iter().map(|s| s.to_string()).collect(),
            age: None,
            weight_kg: None,
        }
    }

    #[test]
    fn refuses_on_welcome_page() {
        let state = AppState::default().select_role(Role::Doctor).unwrap();
        let err = engine()
            .run_check(&state, &request("Jane Doe", &[], &[]), today())
            .unwrap_err();
        assert_eq!(err, CheckError::NotReady);
    }

    #[test]
    fn refuses_empty_name() {
        let err = engine()
            .run_check(&main_page(Role::Doctor), &request("  ", &["Aspirin"], &[]), today())
            .unwrap_err();
        assert_eq!(err, CheckError::EmptyPatientName);
    }

    #[test]
    fn refuses_unknown_patient() {
        let err = engine()
            .run_check(&main_page(Role::Doctor), &request("Nobody", &["Aspirin"], &[]), today())
            .unwrap_err();
        assert_eq!(err, CheckError::PatientNotFound("Nobody".into()));
    }

    #[test]
    fn doctor_end_to_end() {
        let mut req = request("jane doe", &["Aspirin", "Ibuprofen"], &["Alcohol"]);
        req.age = Some(66);

        let report = engine()
            .run_check(&main_page(Role::Doctor), &req, today())
            .unwrap();

        assert_eq!(report.patient.name, "Jane Doe");
        assert_eq!(report.age, 66);
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(
            report.interactions[0].message,
            "Aspirin - Ibuprofen: Increased bleeding risk"
        );
        assert!(report.household.is_none());
        assert_eq!(
            report.dosage.notices[0].message,
            "Aspirin: Recommended dosage is 80.00 mg"
        );
        assert_eq!(
            report.dosage.notices[1].message,
            "Ibuprofen: Recommended dosage is 320.00 mg"
        );
    }

    #[test]
    fn age_defaults_to_date_of_birth() {
        // John Smith, born 1950-09-30: 73 on 2024-06-15.
        let report = engine()
            .run_check(
                &main_page(Role::Doctor),
                &request("John Smith", &["Lisinopril"], &[]),
                today(),
            )
            .unwrap();
        assert_eq!(report.age, 73);
        assert_eq!(report.dosage.recommendations[0].recommended_dosage_mg, 8.0);
    }

    #[test]
    fn stored_weight_drives_low_weight_tier() {
        // Ana Lima weighs 45 kg.
        let report = engine()
            .run_check(
                &main_page(Role::Doctor),
                &request("Ana Lima", &["Metformin"], &[]),
                today(),
            )
            .unwrap();
        assert_eq!(report.weight_kg, 45.0);
        assert_eq!(report.dosage.recommendations[0].recommended_dosage_mg, 450.0);
    }

    #[test]
    fn weight_override_is_clamped_and_not_persisted() {
        let engine = engine();
        let mut req = request("Jane Doe", &["Aspirin"], &[]);
        req.weight_kg = Some(500.0);

        let report = engine
            .run_check(&main_page(Role::Doctor), &req, today())
            .unwrap();
        assert_eq!(report.weight_kg, 300.0);
        assert_eq!(engine.reference().patients[0].weight_kg, 62.5);
    }

    #[test]
    fn age_override_is_clamped() {
        let mut req = request("Jane Doe", &["Aspirin"], &[]);
        req.age = Some(200);
        let report = engine()
            .run_check(&main_page(Role::Doctor), &req, today())
            .unwrap();
        assert_eq!(report.age, 120);
    }

    #[test]
    fn patient_role_checks_household_items() {
        // Jane Doe takes Warfarin and Metformin.
        let report = engine()
            .run_check(
                &main_page(Role::Patient),
                &request("Jane Doe", &[], &["Grapefruit juice", "Alcohol"]),
                today(),
            )
            .unwrap();

        let household = report.household.unwrap();
        let messages: Vec<&str> = household.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Warfarin - Grapefruit juice: May raise warfarin levels",
                "Metformin - Alcohol: Higher risk of lactic acidosis",
            ]
        );
        assert_eq!(report.interactions[0].level, NoticeLevel::Success);
    }

    #[test]
    fn patient_without_medications_household_all_clear() {
        let report = engine()
            .run_check(
                &main_page(Role::Patient),
                &request("Ana Lima", &[], &["Alcohol"]),
                today(),
            )
            .unwrap();
        let household = report.household.unwrap();
        assert_eq!(household.len(), 1);
        assert_eq!(household[0].level, NoticeLevel::Success);
    }
}
