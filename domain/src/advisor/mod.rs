//! Advisor-facing domain types: opinions, priorities and profiles

pub mod opinion;
pub mod profile;

pub use opinion::{Opinion, Priority};
pub use profile::AdvisorProfile;
