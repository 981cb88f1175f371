//! Application layer for advisor-council
//!
//! This crate contains the knowledge log service, the advisors, the
//! coordinator use case and the port definitions. It depends only on the
//! domain layer.

pub mod advisors;
pub mod config;
pub mod knowledge;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use advisors::{Advisor, AdvisorError, AdvisorProtocol, AdvisorSpec, KeywordAdvisorSpec};
pub use config::{CouncilConfig, WeightTuning};
pub use knowledge::{KnowledgeLog, Subscription};
pub use ports::{
    decision_store::{DecisionStore, NoDecisionStore, StoreError},
    memory_recall::{MemoryRecall, NoRecall, RecallError, RememberedFact},
    progress::{DeliberationProgress, NoProgress},
};
pub use use_cases::coordinator::{
    Coordinator, DeliberateError, DeliberateInput, Explanation, InitReport,
};
