use serde::{Deserialize, Serialize};

use crate::models::DosageTier;
use crate::reference::ClinicalReferenceData;

use super::helpers::round_to_hundredths;
use super::messages::MessageTemplates;
use super::types::{DosageRecommendation, DosageReport, Notice};

/// Age/weight adjustment rules. Weights are kilograms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DosagePolicy {
    /// Patients strictly older than this get the elderly factor.
    pub elderly_age_above: u32,
    pub elderly_factor: f64,
    /// Patients strictly lighter than this get the low-weight factor.
    pub low_weight_below_kg: f64,
    pub low_weight_factor: f64,
}

impl Default for DosagePolicy {
    fn default() -> Self {
        Self {
            elderly_age_above: 65,
            elderly_factor: 0.8,
            low_weight_below_kg: 50.0,
            low_weight_factor: 0.9,
        }
    }
}

impl DosagePolicy {
    /// Which tier applies. Age is checked before weight.
    pub fn tier(&self, age: u32, weight_kg: f64) -> DosageTier {
        if age > self.elderly_age_above {
            DosageTier::Elderly
        } else if weight_kg < self.low_weight_below_kg {
            DosageTier::LowWeight
        } else {
            DosageTier::Standard
        }
    }

    pub fn factor(&self, tier: DosageTier) -> f64 {
        match tier {
            DosageTier::Elderly => self.elderly_factor,
            DosageTier::LowWeight => self.low_weight_factor,
            DosageTier::Standard => 1.0,
        }
    }

    /// Adjusted dose (unrounded) and the tier that produced it.
    pub fn adjust(&self, base_dosage_mg: f64, age: u32, weight_kg: f64) -> (f64, DosageTier) {
        let tier = self.tier(age, weight_kg);
        (base_dosage_mg * self.factor(tier), tier)
    }
}

/// Recommend a dose for each selected drug, in selection order.
///
/// A drug missing from the catalog gets an error notice and is skipped;
/// the rest of the batch still runs.
pub fn recommend_dosage(
    selected_drugs: &[String],
    age: u32,
    weight_kg: f64,
    reference: &ClinicalReferenceData,
    policy: &DosagePolicy,
) -> DosageReport {
    let mut report = DosageReport::default();

    for name in selected_drugs {
        let Some(drug) = reference.drug(name) else {
            tracing::warn!(drug = %name, "No catalog row for selected drug, dosage skipped");
            report
                .notices
                .push(Notice::error(MessageTemplates::missing_dosage(name)));
            report.skipped.push(name.clone());
            continue;
        };

        let (adjusted, tier) = policy.adjust(drug.base_dosage_mg, age, weight_kg);
        let recommended = round_to_hundredths(adjusted);

        report
            .notices
            .push(Notice::info(MessageTemplates::dosage(name, adjusted)));
        report.recommendations.push(DosageRecommendation {
            drug: name.clone(),
            base_dosage_mg: drug.base_dosage_mg,
            recommended_dosage_mg: recommended,
            tier,
        });
    }

    tracing::debug!(
        age,
        weight_kg,
        recommended = report.recommendations.len(),
        skipped = report.skipped.len(),
        "Dosage recommendation"
    );

    report
}
