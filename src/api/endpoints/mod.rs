pub mod catalog;
pub mod checks;
pub mod health;
pub mod patients;
pub mod sessions;
