//! User advocate

use super::heuristics::{concern_pressure, keyword_hits, overlap_weight, recommendations};
use super::{Advisor, AdvisorError};
use async_trait::async_trait;
use council_domain::{AdvisorProfile, Entry, Opinion, Priority};
use serde_json::{Map, Value};

const EXPERTISE: [&str; 7] = [
    "user",
    "customer",
    "ux",
    "accessibility",
    "onboarding",
    "support",
    "experience",
];
const DISRUPTIVE: [&str; 6] = [
    "breaking",
    "deprecate",
    "remove",
    "sunset",
    "price increase",
    "migration",
];

pub struct UserAdvocateAdvisor {
    profile: AdvisorProfile,
}

impl UserAdvocateAdvisor {
    pub fn new() -> Self {
        Self {
            profile: AdvisorProfile::new("user_advocate", "User Advocate", EXPERTISE),
        }
    }
}

impl Default for UserAdvocateAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Advisor for UserAdvocateAdvisor {
    fn profile(&self) -> &AdvisorProfile {
        &self.profile
    }

    async fn analyze(
        &self,
        question: &str,
        _context: &Map<String, Value>,
        related: &[Entry],
    ) -> Result<Opinion, AdvisorError> {
        let signals = keyword_hits(question, &EXPERTISE);
        let disruption = keyword_hits(question, &DISRUPTIVE);
        let pressure = concern_pressure(related, &self.profile.id);

        let opinion = if disruption.is_empty() {
            Opinion::new(
                &self.profile.id,
                &self.profile.name,
                recommendations::PROCEED_PHASED,
                0.6 + 0.05 * signals.len() as f64 - pressure,
            )
            .with_rationale("No disruption to existing users expected")
            .with_priority(Priority::Medium)
            .with_opportunity("Gather user feedback after each phase")
        } else {
            Opinion::new(
                &self.profile.id,
                &self.profile.name,
                recommendations::PILOT_FIRST,
                0.7 - pressure,
            )
            .with_rationale(format!(
                "Change is disruptive for users: {}",
                disruption.join(", ")
            ))
            .with_priority(Priority::High)
            .with_concern("Existing users need notice and a migration path")
        };

        Ok(opinion
            .with_data("user_signals", signals.clone())
            .with_tag("users"))
    }

    fn expertise_weight(&self, question: &str, context: &Map<String, Value>) -> f64 {
        overlap_weight(&self.profile, question, context)
    }
}
