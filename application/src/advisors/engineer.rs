//! Engineering advisor

use super::heuristics::{
    concern_pressure, context_number, keyword_hits, overlap_weight, recommendations,
};
use super::{Advisor, AdvisorError};
use async_trait::async_trait;
use council_domain::{AdvisorProfile, Entry, Opinion, Priority};
use serde_json::{Map, Value};

const EXPERTISE: [&str; 10] = [
    "architecture",
    "performance",
    "scalability",
    "migration",
    "database",
    "api",
    "infrastructure",
    "technical debt",
    "rust",
    "latency",
];
const HEAVY_LIFTS: [&str; 6] = [
    "rewrite",
    "migration",
    "migrate",
    "replatform",
    "legacy",
    "from scratch",
];

/// Judges technical feasibility and delivery effort
pub struct EngineerAdvisor {
    profile: AdvisorProfile,
}

impl EngineerAdvisor {
    pub fn new() -> Self {
        Self {
            profile: AdvisorProfile::new("engineer", "Engineering Lead", EXPERTISE),
        }
    }
}

impl Default for EngineerAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Advisor for EngineerAdvisor {
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
        let heavy = keyword_hits(question, &HEAVY_LIFTS);
        let pressure = concern_pressure(related, &self.profile.id);
        let per_signal = 0.05 * signals.len() as f64;

        let (recommendation, confidence, complexity, phases) = if heavy.is_empty() {
            (recommendations::PROCEED_PHASED, 0.6 + per_signal, "moderate", 2)
        } else {
            (recommendations::PILOT_FIRST, 0.7 + per_signal, "high", 3)
        };

        let mut opinion = Opinion::new(
            &self.profile.id,
            &self.profile.name,
            recommendation,
            (confidence - pressure).min(0.92),
        )
        .with_rationale(format!(
            "Technical scope looks {} ({} engineering signal(s))",
            complexity,
            signals.len()
        ))
        .with_priority(if heavy.is_empty() { Priority::Medium } else { Priority::High })
        .with_data("complexity", complexity)
        .with_data("estimated_phases", phases)
        .with_data("technical_signals", signals.clone())
        .with_tag("engineering");

        if !heavy.is_empty() {
            opinion = opinion.with_concern("Migration effort is easy to underestimate");
            if let Some(team) = context_number(context, "team_size").filter(|n| *n < 3.0) {
                opinion = opinion.with_concern(format!("A team of {} is thin for this scope", team));
            }
        }
        if signals.contains(&"performance") || signals.contains(&"latency") {
            opinion = opinion.with_opportunity("Benchmark before and after each phase");
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
    use serde_json::json;

    #[tokio::test]
    async fn test_rewrite_with_small_team_raises_concerns() {
        let mut context = Map::new();
        context.insert("team_size".into(), json!(2));
        let opinion = EngineerAdvisor::new()
            .analyze("Rewrite the database layer from scratch?", &context, &[])
            .await
            .unwrap();
        assert_eq!(opinion.recommendation, recommendations::PILOT_FIRST);
        assert_eq!(opinion.concerns.len(), 2);
        assert_eq!(opinion.supporting_data["complexity"], json!("high"));
    }

    #[tokio::test]
    async fn test_incremental_change_proceeds() {
        let opinion = EngineerAdvisor::new()
            .analyze("Add an API endpoint for exports?", &Map::new(), &[])
            .await
            .unwrap();
        assert_eq!(opinion.recommendation, recommendations::PROCEED_PHASED);
        assert!((opinion.confidence - 0.65).abs() < 1e-9);
    }
}
