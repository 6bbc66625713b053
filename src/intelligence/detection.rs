use crate::reference::ClinicalReferenceData;

use super::helpers::unordered_pairs;
use super::messages::MessageTemplates;
use super::types::Notice;

// ---------------------------------------------------------------------------
// Drug-drug interactions
// ---------------------------------------------------------------------------

/// Check every unordered pair of selected drugs against the interaction table.
///
/// Each pair yields at most one warning (the first matching row, either column
/// order). With no warnings the result is a single success notice, which also
/// covers selections of zero or one drug.
pub fn check_interactions(
    selected_drugs: &[String],
    reference: &ClinicalReferenceData,
) -> Vec<Notice> {
    let warnings: Vec<Notice> = unordered_pairs(selected_drugs)
        .filter_map(|(a, b)| {
            reference
                .find_interaction(a, b)
                .map(|row| Notice::warning(MessageTemplates::interaction(a, b, &row.description)))
        })
        .collect();

    tracing::debug!(
        selected = selected_drugs.len(),
        found = warnings.len(),
        "Drug interaction check"
    );

    if warnings.is_empty() {
        vec![Notice::success(MessageTemplates::no_interactions())]
    } else {
        warnings
    }
}

// ---------------------------------------------------------------------------
// Drug-household item interactions
// ---------------------------------------------------------------------------

/// Check each (current medication, household item) pair. Same contract as
/// [`check_interactions`]: warnings per match, otherwise one success notice.
pub fn check_household_interactions(
    medications: &[String],
    items: &[String],
    reference: &ClinicalReferenceData,
) -> Vec<Notice> {
    let warnings: Vec<Notice> = medications
        .iter()
        .flat_map(move |med| items.iter().map(move |item| (med, item)))
        .filter_map(|(med, item)| {
            reference
                .find_household_interaction(med, item)
                .map(|row| {
                    Notice::warning(MessageTemplates::household_interaction(
                        med,
                        item,
                        &row.description,
                    ))
                })
        })
        .collect();

    tracing::debug!(
        medications = medications.len(),
        items = items.len(),
        found = warnings.len(),
        "Household interaction check"
    );

    if warnings.is_empty() {
        vec![Notice::success(MessageTemplates::no_household_interactions())]
    } else {
        warnings
    }
}
