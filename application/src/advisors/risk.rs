//! Risk advisor

use super::heuristics::{
    concern_pressure, context_flag, keyword_hits, overlap_weight, recommendations,
};
use super::{Advisor, AdvisorError};
use async_trait::async_trait;
use council_domain::{AdvisorProfile, Entry, Opinion, Priority};
use serde_json::{Map, Value};

const EXPERTISE: [&str; 8] = [
    "security",
    "risk",
    "compliance",
    "privacy",
    "outage",
    "data loss",
    "legal",
    "vulnerability",
];
const THREATS: [&str; 9] = [
    "security",
    "vulnerab",
    "breach",
    "privacy",
    "personal data",
    "pii",
    "credential",
    "data loss",
    "exploit",
];
const SEVERE: [&str; 3] = ["breach", "exploit", "vulnerab"];
const OPERATIONAL: [&str; 5] = ["migration", "migrate", "rewrite", "downtime", "outage"];
const REGULATORY: [&str; 3] = ["compliance", "legal", "regulat"];

/// Looks for security, compliance and operational exposure
pub struct RiskAdvisor {
    profile: AdvisorProfile,
}

impl RiskAdvisor {
    pub fn new() -> Self {
        Self {
            profile: AdvisorProfile::new("risk", "Risk Analyst", EXPERTISE),
        }
    }
}

impl Default for RiskAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Advisor for RiskAdvisor {
    fn profile(&self) -> &AdvisorProfile {
        &self.profile
    }

    async fn analyze(
        &self,
        question: &str,
        context: &Map<String, Value>,
        related: &[Entry],
    ) -> Result<Opinion, AdvisorError> {
        let threats = keyword_hits(question, &THREATS);
        let operational = keyword_hits(question, &OPERATIONAL);
        let regulatory = keyword_hits(question, &REGULATORY);
        let severe = context_flag(context, "incident") || !keyword_hits(question, &SEVERE).is_empty();
        let pressure = concern_pressure(related, &self.profile.id);

        let id = &self.profile.id;
        let name = &self.profile.name;
        let opinion = if !threats.is_empty() {
            let confidence = (0.7 + 0.05 * threats.len() as f64).min(0.95);
            let mut opinion = Opinion::new(id, name, recommendations::HOLD_FOR_REVIEW, confidence)
                .with_rationale(format!(
                    "Security exposure detected: {}",
                    threats.join(", ")
                ))
                .with_priority(if severe { Priority::Critical } else { Priority::High });
            for threat in &threats {
                opinion = opinion.with_concern(format!("Exposure around {}", threat));
            }
            opinion
        } else if !operational.is_empty() {
            Opinion::new(id, name, recommendations::PILOT_FIRST, 0.65 - pressure)
                .with_rationale("Operational change with rollback risk")
                .with_priority(Priority::Medium)
                .with_concern("A tested rollback plan is required")
        } else if !regulatory.is_empty() {
            Opinion::new(id, name, recommendations::PROCEED_WITH_SAFEGUARDS, 0.6 - pressure)
                .with_rationale("Regulatory obligations apply but no direct threat found")
                .with_priority(Priority::Medium)
                .with_concern("Document compliance sign-off before launch")
        } else {
            Opinion::new(id, name, recommendations::PROCEED_PHASED, 0.55 - pressure)
                .with_rationale("No material risk signals found")
                .with_priority(Priority::Low)
        };

        Ok(opinion
            .with_data("threat_signals", threats.clone())
            .with_data("severe", severe)
            .with_tag("risk"))
    }

    fn expertise_weight(&self, question: &str, context: &Map<String, Value>) -> f64 {
        overlap_weight(&self.profile, question, context)
    }
}
