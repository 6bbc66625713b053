//! Interaction detection and dosage adjustment over the in-memory reference tables.

pub mod detection;
pub mod dosage;
pub mod engine;
pub mod helpers;
pub mod messages;
pub mod types;

pub use dosage::DosagePolicy;
pub use engine::DefaultDecisionEngine;
pub use types::{CheckError, CheckReport, CheckRequest, DecisionSupport, Notice};
