//! Finance advisor

use super::heuristics::{
    concern_pressure, context_number, keyword_hits, overlap_weight, recommendations,
};
use super::{Advisor, AdvisorError};
use async_trait::async_trait;
use council_domain::{AdvisorProfile, Entry, Opinion, Priority};
use serde_json::{Map, Value};

const EXPERTISE: [&str; 8] = [
    "budget", "cost", "revenue", "pricing", "roi", "spend", "funding", "price",
];

/// Compares the stated cost against the stated budget
///
/// Reads `budget` and `cost` from the context when present.
pub struct FinanceAdvisor {
    profile: AdvisorProfile,
}

impl FinanceAdvisor {
    pub fn new() -> Self {
        Self {
            profile: AdvisorProfile::new("finance", "Finance Advisor", EXPERTISE),
        }
    }
}

impl Default for FinanceAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Advisor for FinanceAdvisor {
    fn profile(&self) -> &AdvisorProfile {
        &self.profile
    }

    async fn analyze(
        &self,
        question: &str,
        context: &Map<String, Value>,
        related: &[Entry],
    ) -> Result<Opinion, AdvisorError> {
        let signals = keyword_hits(question, &EXPERTISE);
        let budget = context_number(context, "budget");
        let cost = context_number(context, "cost");
        let id = &self.profile.id;
        let name = &self.profile.name;

        let opinion = match (budget, cost) {
            (Some(budget), Some(cost)) if cost > budget => {
                let overrun = if budget > 0.0 {
                    (cost - budget) / budget * 100.0
                } else {
                    100.0
                };
                Opinion::new(id, name, recommendations::DEFER_FOR_BUDGET, 0.85)
                    .with_rationale("Projected cost exceeds the available budget")
                    .with_priority(Priority::High)
                    .with_concern(format!(
                        "Cost {} exceeds budget {} by {:.0}%",
                        cost, budget, overrun
                    ))
                    .with_data("budget_headroom", budget - cost)
            }
            (Some(budget), Some(cost)) => {
                Opinion::new(id, name, recommendations::PROCEED_PHASED, 0.75)
                    .with_rationale("Cost fits within budget")
                    .with_priority(Priority::Medium)
                    .with_data("budget_headroom", budget - cost)
                    .with_opportunity("Stage spending to match each rollout phase")
            }
            _ => {
                let confidence = 0.5 + 0.05 * signals.len() as f64;
                let mut opinion = Opinion::new(id, name, recommendations::PROCEED_PHASED, confidence)
                    .with_rationale("No budget figures supplied; judging on scope alone")
                    .with_priority(Priority::Low);
                if !signals.is_empty() {
                    opinion = opinion.with_concern("No cost estimate provided");
                }
                opinion
            }
        };

        let confidence = opinion.confidence - concern_pressure(related, id);
        let mut opinion = opinion
            .with_data("financial_signals", signals.clone())
            .with_tag("finance");
        opinion.confidence = confidence;
        if let Some(budget) = budget {
            opinion = opinion.with_data("budget", budget);
        }
        if let Some(cost) = cost {
            opinion = opinion.with_data("cost", cost);
        }
        Ok(opinion.clamped())
    }

    fn expertise_weight(&self, question: &str, context: &Map<String, Value>) -> f64 {
        overlap_weight(&self.profile, question, context)
    }
}
