/// Message template builder for check output.
/// Interaction lines read "A - B: description" so they can be scanned quickly.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Drug-drug interaction.
    pub fn interaction(drug_a: &str, drug_b: &str, description: &str) -> String {
        format!("{} - {}: {}", drug_a, drug_b, description)
    }

    pub fn no_interactions() -> String {
        "No known interactions found.".to_string()
    }

    /// Drug-household item interaction.
    pub fn household_interaction(drug: &str, item: &str, description: &str) -> String {
        format!("{} - {}: {}", drug, item, description)
    }

    pub fn no_household_interactions() -> String {
        "No known household item interactions found.".to_string()
    }

    /// Dosage line, always two decimals.
    pub fn dosage(drug: &str, dosage_mg: f64) -> String {
        format!("{}: Recommended dosage is {:.2} mg", drug, dosage_mg)
    }

    pub fn missing_dosage(drug: &str) -> String {
        format!(
            "{}: No dosage information found. Recommendation skipped.",
            drug
        )
    }

    pub fn patient_not_found(name: &str) -> String {
        format!(
            "Patient '{}' not found. Please check the name and try again.",
            name
        )
    }
}
