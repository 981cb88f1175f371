//! Domain layer for advisor-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure, presentation, or an async runtime.
//!
//! # Core Concepts
//!
//! ## Knowledge Log
//!
//! An append-only, topic-partitioned store of timestamped facts ([`Entry`]).
//! Advisors read what has already been said about a topic and post their own
//! insights, recommendations and concerns back to it.
//!
//! ## Advisors and Opinions
//!
//! Each advisor has a fixed [`AdvisorProfile`] and produces one [`Opinion`]
//! per round.
//!
//! ## Aggregation
//!
//! The [`Aggregator`] reduces a round's opinions plus per-advisor weights to a
//! single [`Decision`] using one of five [`AggregationMethod`]s.

pub mod advisor;
pub mod aggregation;
pub mod config;
pub mod core;
pub mod deliberation;
pub mod knowledge;

// Re-export commonly used types
pub use advisor::{AdvisorProfile, Opinion, Priority};
pub use aggregation::{
    AggregationMethod, AggregationTuning, Aggregator, Decision, DecisionSummary,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, SelectionMode, Severity};
pub use core::{error::DomainError, question::Question};
pub use deliberation::{
    AdvisorPerformance, DeliberationRecord, DeliberationStats, PerformanceLedger,
};
pub use knowledge::{Entry, EntryFilter, EntryId, EntryKind, NewEntry, Relevance, TopicStatistics};
