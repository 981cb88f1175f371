//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement. Each port ships with a no-op implementation.

pub mod decision_store;
pub mod memory_recall;
pub mod progress;
