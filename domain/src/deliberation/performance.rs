//! Per-advisor performance counters

use crate::advisor::Opinion;
use crate::aggregation::Decision;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running counters for one advisor across rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorPerformance {
    pub advisor_id: String,
    pub participations: usize,
    pub supported: usize,
    pub dissented: usize,
    confidence_sum: f64,
}

impl AdvisorPerformance {
    pub fn new(advisor_id: impl Into<String>) -> Self {
        Self {
            advisor_id: advisor_id.into(),
            ..Default::default()
        }
    }

    /// Fraction of participations where the advisor backed the winner
    pub fn support_rate(&self) -> f64 {
        ratio(self.supported, self.participations)
    }

    /// Fraction of participations where the advisor dissented
    pub fn dissent_rate(&self) -> f64 {
        ratio(self.dissented, self.participations)
    }

    /// Mean confidence across every opinion the advisor gave
    pub fn mean_confidence(&self) -> f64 {
        if self.participations == 0 {
            0.0
        } else {
            self.confidence_sum / self.participations as f64
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Counters for every advisor that has taken part in a round.
///
/// Kept apart from the bounded history so evicting old records does not
/// reset an advisor's track record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLedger {
    advisors: BTreeMap<String, AdvisorPerformance>,
}

impl PerformanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round
    pub fn record(&mut self, decision: &Decision, opinions: &[Opinion]) {
        for opinion in opinions {
            let entry = self
                .advisors
                .entry(opinion.advisor_id.clone())
                .or_insert_with(|| AdvisorPerformance::new(&opinion.advisor_id));
            entry.participations += 1;
            entry.confidence_sum += opinion.confidence;
            if decision.supporting.contains(&opinion.advisor_id) {
                entry.supported += 1;
            } else if decision.dissenting.contains(&opinion.advisor_id) {
                entry.dissented += 1;
            }
        }
    }

    pub fn get(&self, advisor_id: &str) -> Option<&AdvisorPerformance> {
        self.advisors.get(advisor_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdvisorPerformance> {
        self.advisors.values()
    }

    pub fn len(&self) -> usize {
        self.advisors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisors.is_empty()
    }
}
