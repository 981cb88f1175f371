//! Round-level records: what was asked, what was decided, and how each
//! advisor has fared over time.

pub mod performance;
pub mod record;

pub use performance::{AdvisorPerformance, PerformanceLedger};
pub use record::{DeliberationRecord, DeliberationStats};
