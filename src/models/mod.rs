pub mod drug;
pub mod enums;
pub mod patient;

pub use drug::{Drug, DrugInteraction, HouseholdInteraction};
pub use enums::{DosageTier, InvalidEnum, NoticeLevel, Page, Role};
pub use patient::Patient;

/// Canonical form of a drug, item or patient name for comparison.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trimmed, case-insensitive name equality.
pub fn names_match(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}
