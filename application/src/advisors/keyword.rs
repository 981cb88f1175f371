//! Advisors defined in configuration
//!
//! A keyword advisor has a fixed recommendation and list of concerns; its
//! confidence grows with the number of its expertise tags the question hits.

use super::heuristics::{concern_pressure, overlap_weight};
use super::{Advisor, AdvisorError, KeywordAdvisorSpec};
use async_trait::async_trait;
use council_domain::{AdvisorProfile, Entry, Opinion};
use serde_json::{Map, Value};

pub struct KeywordAdvisor {
    profile: AdvisorProfile,
    recommendation: String,
    concerns: Vec<String>,
    base_confidence: f64,
}

impl KeywordAdvisor {
    /// # Errors
    /// [`AdvisorError::Construction`] when the id, expertise or recommendation is empty.
    pub fn new(spec: &KeywordAdvisorSpec) -> Result<Self, AdvisorError> {
        let construction = |reason: &str| AdvisorError::Construction {
            advisor: spec.id.clone(),
            reason: reason.to_string(),
        };

        if spec.id.trim().is_empty() {
            return Err(construction("advisor id is empty"));
        }
        let profile = AdvisorProfile::new(
            spec.id.trim(),
            if spec.name.trim().is_empty() { spec.id.trim() } else { spec.name.trim() },
            spec.expertise.iter().map(String::as_str),
        );
        if profile.expertise.is_empty() {
            return Err(construction("no expertise tags"));
        }
        if spec.recommendation.trim().is_empty() {
            return Err(construction("recommendation is empty"));
        }

        Ok(Self {
            profile,
            recommendation: spec.recommendation.trim().to_string(),
            concerns: spec.concerns.clone(),
            base_confidence: spec.confidence.clamp(0.0, 1.0),
        })
    }
}

#[async_trait]
impl Advisor for KeywordAdvisor {
    fn profile(&self) -> &AdvisorProfile {
        &self.profile
    }

    async fn analyze(
        &self,
        question: &str,
        _context: &Map<String, Value>,
        related: &[Entry],
    ) -> Result<Opinion, AdvisorError> {
        let hits = self.profile.matching_expertise(question);
        let pressure = concern_pressure(related, &self.profile.id);

        // Off-topic questions still get an answer, with less conviction
        let confidence = if hits.is_empty() {
            self.base_confidence * 0.6
        } else {
            self.base_confidence + 0.1 * hits.len() as f64
        };

        let rationale = if hits.is_empty() {
            "Question is outside this advisor's expertise".to_string()
        } else {
            format!("Matched expertise: {}", hits.join(", "))
        };

        let mut opinion = Opinion::new(
            &self.profile.id,
            &self.profile.name,
            &self.recommendation,
            confidence - pressure,
        )
        .with_rationale(rationale)
        .with_data("matched_expertise", hits.clone())
        .with_tag("custom");

        if !hits.is_empty() {
            for concern in &self.concerns {
                opinion = opinion.with_concern(concern.as_str());
            }
        }
        Ok(opinion)
    }

    fn expertise_weight(&self, question: &str, context: &Map<String, Value>) -> f64 {
        overlap_weight(&self.profile, question, context)
    }
}
