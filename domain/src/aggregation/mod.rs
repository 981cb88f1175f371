//! Opinion aggregation
//!
//! Reduces the opinions gathered in one round to a single [`Decision`].
//!
//! - [`AggregationMethod`]: which reduction algorithm to use
//! - [`AggregationTuning`]: configurable band thresholds and factors
//! - [`Aggregator`]: the reduction itself
//! - [`Decision`]: winner, confidence, agreement, supporters and dissenters

pub mod aggregator;
pub mod decision;
pub mod method;
pub mod tuning;

pub use aggregator::{Aggregator, DEFAULT_WEIGHT};
pub use decision::{Decision, DecisionSummary, agreement_label, rationale_for};
pub use method::AggregationMethod;
pub use tuning::AggregationTuning;
