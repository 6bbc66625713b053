use serde::{Deserialize, Serialize};

use super::names_match;

/// A catalog entry: one drug and its unadjusted dose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drug {
    #[serde(rename = "drug_name")]
    pub name: String,
    /// Base dosage in milligrams.
    #[serde(rename = "base_dosage")]
    pub base_dosage_mg: f64,
}

/// A recorded drug-drug interaction. The pair is unordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugInteraction {
    pub drug1: String,
    pub drug2: String,
    #[serde(rename = "interaction")]
    pub description: String,
}

impl DrugInteraction {
    /// True when this row covers the pair `(a, b)` in either column order.
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (names_match(&self.drug1, a) && names_match(&self.drug2, b))
            || (names_match(&self.drug1, b) && names_match(&self.drug2, a))
    }
}

/// A recorded interaction between a drug and a household item
/// (food, drink, supplement).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HouseholdInteraction {
    pub drug: String,
    pub item: String,
    #[serde(rename = "interaction")]
    pub description: String,
}

impl HouseholdInteraction {
    pub fn matches(&self, drug: &str, item: &str) -> bool {
        names_match(&self.drug, drug) && names_match(&self.item, item)
    }
}
