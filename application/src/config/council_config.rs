//! Coordinator configuration
//!
//! Built by the infrastructure config loader from file and environment
//! sources; `Default` gives the documented behaviour with no config at all.

use crate::advisors::{AdvisorProtocol, AdvisorSpec, DEFAULT_CORE_ADVISORS};
use council_domain::{AggregationMethod, AggregationTuning, SelectionMode};
use std::time::Duration;

/// Bonuses applied on top of an advisor's expertise weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTuning {
    /// An opinion with more supporting data points than this earns `rich_data_bonus`
    pub rich_data_threshold: usize,
    pub rich_data_bonus: f64,
    /// An opinion more confident than this earns `high_confidence_bonus`
    pub high_confidence_threshold: f64,
    pub high_confidence_bonus: f64,
}

impl Default for WeightTuning {
    fn default() -> Self {
        Self {
            rich_data_threshold: 5,
            rich_data_bonus: 0.1,
            high_confidence_threshold: 0.8,
            high_confidence_bonus: 0.05,
        }
    }
}

impl WeightTuning {
    /// Final weight for one responder, clamped to [0, 1]
    pub fn weigh(&self, expertise_weight: f64, data_points: usize, confidence: f64) -> f64 {
        let mut weight = expertise_weight;
        if data_points > self.rich_data_threshold {
            weight += self.rich_data_bonus;
        }
        if confidence > self.high_confidence_threshold {
            weight += self.high_confidence_bonus;
        }
        if weight.is_nan() {
            0.0
        } else {
            weight.clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone)]
pub struct CouncilConfig {
    /// Advisors the coordinator may construct
    pub advisors: Vec<AdvisorSpec>,
    /// Only construct the core advisors at initialisation
    pub initialize_core_only: bool,
    /// How advisors are chosen when the caller names none
    pub selection: SelectionMode,
    pub core_advisors: Vec<String>,
    /// Completed rounds kept in memory
    pub history_capacity: usize,
    pub default_method: AggregationMethod,
    pub default_deadline: Duration,
    /// Facts requested from memory recall per advisor
    pub recall_limit: usize,
    pub protocol: AdvisorProtocol,
    pub aggregation: AggregationTuning,
    pub weighting: WeightTuning,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            advisors: AdvisorSpec::builtin(),
            initialize_core_only: false,
            selection: SelectionMode::default(),
            core_advisors: DEFAULT_CORE_ADVISORS.iter().map(|s| s.to_string()).collect(),
            history_capacity: 100,
            default_method: AggregationMethod::default(),
            default_deadline: Duration::from_secs(30),
            recall_limit: 5,
            protocol: AdvisorProtocol::default(),
            aggregation: AggregationTuning::default(),
            weighting: WeightTuning::default(),
        }
    }
}

impl CouncilConfig {
    pub fn with_advisors(mut self, advisors: Vec<AdvisorSpec>) -> Self {
        self.advisors = advisors;
        self
    }

    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_default_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = deadline;
        self
    }

    pub fn is_core(&self, advisor_id: &str) -> bool {
        self.core_advisors.iter().any(|id| id == advisor_id)
    }
}
