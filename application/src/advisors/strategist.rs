//! Strategy advisor

use super::heuristics::{
    concern_pressure, keyword_hits, overlap_weight, recalled_count, recommendations,
};
use super::{Advisor, AdvisorError};
use async_trait::async_trait;
use council_domain::{AdvisorProfile, Entry, Opinion, Priority};
use serde_json::{Map, Value};

const EXPERTISE: [&str; 7] = [
    "strategy",
    "growth",
    "market",
    "roadmap",
    "competition",
    "vision",
    "launch",
];
const CAUTION: [&str; 5] = ["risky", "uncertain", "unproven", "experimental", "bet"];
const URGENCY: [&str; 4] = ["urgent", "deadline", "asap", "this quarter"];

/// Weighs questions against market position and long-term direction
pub struct StrategistAdvisor {
    profile: AdvisorProfile,
}

impl StrategistAdvisor {
    pub fn new() -> Self {
        Self {
            profile: AdvisorProfile::new("strategist", "Strategist", EXPERTISE),
        }
    }
}

impl Default for StrategistAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Advisor for StrategistAdvisor {
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
        let caution = keyword_hits(question, &CAUTION);
        let urgent = !keyword_hits(question, &URGENCY).is_empty();

        let recommendation = if caution.is_empty() {
            recommendations::PROCEED_PHASED
        } else {
            recommendations::PILOT_FIRST
        };
        let memory_bonus = 0.05 * recalled_count(context).min(2) as f64;
        let confidence = (0.55 + 0.08 * signals.len() as f64 + memory_bonus
            - concern_pressure(related, &self.profile.id))
        .min(0.9);

        let mut rationale = format!(
            "Strategic fit: {} signal(s) in the question",
            signals.len()
        );
        if !caution.is_empty() {
            rationale.push_str("; the plan rests on open assumptions");
        }

        let mut opinion = Opinion::new(&self.profile.id, &self.profile.name, recommendation, confidence)
            .with_rationale(rationale)
            .with_priority(if urgent { Priority::High } else { Priority::Medium })
            .with_data("strategic_signals", signals.clone())
            .with_data("caution_signals", caution.clone())
            .with_tag("strategy");

        if signals.iter().any(|s| *s == "market" || *s == "competition") {
            opinion = opinion.with_opportunity("Early entry strengthens market position");
        }
        if signals.contains(&"growth") {
            opinion = opinion.with_opportunity("Opens a new growth channel");
        }
        if !caution.is_empty() {
            opinion = opinion.with_concern("Strategic bet rests on unproven assumptions");
        }
        Ok(opinion)
    }

    fn expertise_weight(&self, question: &str, context: &Map<String, Value>) -> f64 {
        overlap_weight(&self.profile, question, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_market_question_proceeds() {
        let advisor = StrategistAdvisor::new();
        let opinion = advisor
            .analyze("Should we launch in a new market?", &Map::new(), &[])
            .await
            .unwrap();
        assert_eq!(opinion.recommendation, recommendations::PROCEED_PHASED);
        assert_eq!(opinion.opportunities.len(), 1);
        assert!(opinion.concerns.is_empty());
        assert!((opinion.confidence - 0.71).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_uncertain_bet_asks_for_pilot() {
        let advisor = StrategistAdvisor::new();
        let opinion = advisor
            .analyze("Is this experimental product urgent?", &Map::new(), &[])
            .await
            .unwrap();
        assert_eq!(opinion.recommendation, recommendations::PILOT_FIRST);
        assert_eq!(opinion.priority, Priority::High);
        assert_eq!(opinion.concerns.len(), 1);
    }
}
