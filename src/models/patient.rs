use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separator for the free-text medication list ("Aspirin, Warfarin").
static RE_MED_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

/// A patient row as stored in the patient table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "DateOfBirth")]
    pub date_of_birth: NaiveDate,
    /// Weight in kilograms.
    #[serde(rename = "Weight")]
    pub weight_kg: f64,
    /// Free text, comma-separated. Absent for patients with no medications.
    #[serde(rename = "CurrentMedications", default)]
    pub current_medications: Option<String>,
}

impl Patient {
    /// Parse the free-text medication list into discrete entries.
    pub fn medication_list(&self) -> Vec<String> {
        self.current_medications
            .as_deref()
            .map(parse_medication_list)
            .unwrap_or_default()
    }

    /// Age in whole years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_on(self.date_of_birth, today)
    }
}

/// Split a free-text medication list on commas.
pub fn parse_medication_list(raw: &str) -> Vec<String> {
    RE_MED_SEPARATOR
        .split(raw.trim())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

/// Calendar-aware age: years between the dates, minus one if the birthday
/// has not yet come round this year. A birth date after `today` gives 0.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}
