use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{name_key, Drug, DrugInteraction, HouseholdInteraction, Patient};

pub const DRUG_TABLE: &str = "drug_data.csv";
pub const INTERACTION_TABLE: &str = "interaction_data.csv";
pub const HOUSEHOLD_TABLE: &str = "household_interaction_data.csv";
pub const PATIENT_TABLE: &str = "patient_data.csv";

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data load failed ({0}): {1}")]
    Load(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    Parse(String, String),
}

/// The read-only tables every check runs against.
/// Loaded once per process and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ClinicalReferenceData {
    pub drugs: Vec<Drug>,
    pub interactions: Vec<DrugInteraction>,
    pub household_interactions: Vec<HouseholdInteraction>,
    pub patients: Vec<Patient>,
}

impl ClinicalReferenceData {
    /// Load all tables from CSV files in `dir`.
    ///
    /// The household table is optional: only the patient-facing check uses it.
    pub fn load(dir: &Path) -> Result<Self, ReferenceError> {
        let drugs: Vec<Drug> = read_table(&dir.join(DRUG_TABLE))?;
        let interactions: Vec<DrugInteraction> = read_table(&dir.join(INTERACTION_TABLE))?;
        let patients: Vec<Patient> = read_table(&dir.join(PATIENT_TABLE))?;

        let household_path = dir.join(HOUSEHOLD_TABLE);
        let household_interactions: Vec<HouseholdInteraction> = if household_path.is_file() {
            read_table(&household_path)?
        } else {
            tracing::warn!(
                path = %household_path.display(),
                "Household interaction table missing, household checks will find nothing"
            );
            Vec::new()
        };

        tracing::info!(
            drugs = drugs.len(),
            interactions = interactions.len(),
            household = household_interactions.len(),
            patients = patients.len(),
            dir = %dir.display(),
            "Reference tables loaded"
        );

        Ok(Self {
            drugs,
            interactions,
            household_interactions,
            patients,
        })
    }

    /// Create reference data for tests (no file I/O).
    pub fn load_test() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        Self {
            drugs: vec![
                Drug {
                    name: "Aspirin".into(),
                    base_dosage_mg: 100.0,
                },
                Drug {
                    name: "Ibuprofen".into(),
                    base_dosage_mg: 400.0,
                },
                Drug {
                    name: "Warfarin".into(),
                    base_dosage_mg: 5.0,
                },
                Drug {
                    name: "Metformin".into(),
                    base_dosage_mg: 500.0,
                },
                Drug {
                    name: "Lisinopril".into(),
                    base_dosage_mg: 10.0,
                },
            ],
            interactions: vec![
                DrugInteraction {
                    drug1: "Aspirin".into(),
                    drug2: "Ibuprofen".into(),
                    description: "Increased bleeding risk".into(),
                },
                DrugInteraction {
                    drug1: "Warfarin".into(),
                    drug2: "Aspirin".into(),
                    description: "Greatly increased bleeding risk".into(),
                },
                DrugInteraction {
                    drug1: "Lisinopril".into(),
                    drug2: "Ibuprofen".into(),
                    description: "Reduced blood pressure control".into(),
                },
            ],
            household_interactions: vec![
                HouseholdInteraction {
                    drug: "Warfarin".into(),
                    item: "Grapefruit juice".into(),
                    description: "May raise warfarin levels".into(),
                },
                HouseholdInteraction {
                    drug: "Warfarin".into(),
                    item: "Spinach".into(),
                    description: "Vitamin K can reduce warfarin effect".into(),
                },
                HouseholdInteraction {
                    drug: "Metformin".into(),
                    item: "Alcohol".into(),
                    description: "Higher risk of lactic acidosis".into(),
                },
            ],
            patients: vec![
                Patient {
                    name: "Jane Doe".into(),
                    date_of_birth: date(1985, 4, 12),
                    weight_kg: 62.5,
                    current_medications: Some("Warfarin, Metformin".into()),
                },
                Patient {
                    name: "John Smith".into(),
                    date_of_birth: date(1950, 9, 30),
                    weight_kg: 81.0,
                    current_medications: Some("Lisinopril".into()),
                },
                Patient {
                    name: "Ana Lima".into(),
                    date_of_birth: date(2001, 2, 3),
                    weight_kg: 45.0,
                    current_medications: None,
                },
            ],
        }
    }

    /// Look up a catalog drug by name.
    pub fn drug(&self, name: &str) -> Option<&Drug> {
        let key = name_key(name);
        self.drugs.iter().find(|d| name_key(&d.name) == key)
    }

    /// Catalog drug names in table order.
    pub fn drug_names(&self) -> Vec<&str> {
        self.drugs.iter().map(|d| d.name.as_str()).collect()
    }

    /// Distinct household item names, sorted case-insensitively.
    pub fn household_items(&self) -> Vec<&str> {
        let mut items: BTreeMap<String, &str> = BTreeMap::new();
        for row in &self.household_interactions {
            items.entry(name_key(&row.item)).or_insert(row.item.as_str());
        }
        items.into_values().collect()
    }

    /// First interaction row covering the unordered pair `(a, b)`.
    pub fn find_interaction(&self, a: &str, b: &str) -> Option<&DrugInteraction> {
        self.interactions.iter().find(|row| row.involves(a, b))
    }

    /// First household row for `(drug, item)`.
    pub fn find_household_interaction(
        &self,
        drug: &str,
        item: &str,
    ) -> Option<&HouseholdInteraction> {
        self.household_interactions
            .iter()
            .find(|row| row.matches(drug, item))
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ReferenceError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| ReferenceError::Parse(file_name, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tables(dir: &Path, with_household: bool) {
        std::fs::write(
            dir.join(DRUG_TABLE),
            "drug_name,base_dosage\nAspirin,100\nIbuprofen,400\n",
        )
        .unwrap();
        std::fs::write(
            dir.join(INTERACTION_TABLE),
            "drug1,drug2,interaction\nAspirin,Ibuprofen,Increased bleeding risk\n",
        )
        .unwrap();
        std::fs::write(
            dir.join(PATIENT_TABLE),
            "Name,DateOfBirth,Weight,CurrentMedications\n\
             Jane Doe,2000-06-15,58.5,\"Aspirin, Ibuprofen\"\n\
             John Roe,1950-01-01,90,\n",
        )
        .unwrap();
        if with_household {
            std::fs::write(
                dir.join(HOUSEHOLD_TABLE),
                "drug,item,interaction\nAspirin,Alcohol,Stomach bleeding\n",
            )
            .unwrap();
        }
    }

    #[test]
    fn load_reads_all_tables() {
        let tmp = tempfile::tempdir().unwrap();
        write_tables(tmp.path(), true);

        let data = ClinicalReferenceData::load(tmp.path()).unwrap();
        assert_eq!(data.drugs.len(), 2);
        assert_eq!(data.drugs[1].base_dosage_mg, 400.0);
        assert_eq!(data.interactions.len(), 1);
        assert_eq!(data.household_interactions.len(), 1);
        assert_eq!(data.patients.len(), 2);
        assert_eq!(
            data.patients[0].date_of_birth,
            NaiveDate::from_ymd_opt(2000, 6, 15).unwrap()
        );
        assert_eq!(
            data.patients[0].medication_list(),
            vec!["Aspirin", "Ibuprofen"]
        );
        assert!(data.patients[1].medication_list().is_empty());
    }

    #[test]
    fn missing_household_table_is_tolerated() {
        let tmp = tempfile::tempdir().unwrap();
        write_tables(tmp.path(), false);

        let data = ClinicalReferenceData::load(tmp.path()).unwrap();
        assert!(data.household_interactions.is_empty());
    }

    #[test]
    fn missing_drug_table_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ClinicalReferenceData::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ReferenceError::Load(..)));
    }

    #[test]
    fn malformed_row_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_tables(tmp.path(), true);
        std::fs::write(
            tmp.path().join(DRUG_TABLE),
            "drug_name,base_dosage\nAspirin,lots\n",
        )
        .unwrap();

        match ClinicalReferenceData::load(tmp.path()).unwrap_err() {
            ReferenceError::Parse(file, _) => assert_eq!(file, DRUG_TABLE),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bundled_resources_load() {
        let data = ClinicalReferenceData::load(&crate::config::bundled_tables_dir()).unwrap();
        assert!(!data.drugs.is_empty());
        assert!(!data.patients.is_empty());
    }

    #[test]
    fn drug_lookup_case_insensitive() {
        let data = ClinicalReferenceData::load_test();
        assert_eq!(data.drug("aspirin").unwrap().base_dosage_mg, 100.0);
        assert!(data.drug("Paracetamol").is_none());
    }

    #[test]
    fn find_interaction_either_order() {
        let data = ClinicalReferenceData::load_test();
        let row = data.find_interaction("Ibuprofen", "Aspirin").unwrap();
        assert_eq!(row.description, "Increased bleeding risk");
        assert!(data.find_interaction("Metformin", "Aspirin").is_none());
    }

    #[test]
    fn household_items_distinct_and_sorted() {
        let data = ClinicalReferenceData::load_test();
        assert_eq!(
            data.household_items(),
            vec!["Alcohol", "Grapefruit juice", "Spinach"]
        );
    }
}
