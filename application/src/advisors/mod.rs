//! Advisors
//!
//! An advisor analyses a question, turns its [`Opinion`] into knowledge-log
//! entries and, after the council decides, may post a reflection when it
//! disagreed strongly. The analysis is the only part each advisor implements;
//! the posting protocol is shared through provided trait methods.

mod catalog;
mod engineer;
mod finance;
mod heuristics;
mod keyword;
mod risk;
mod strategist;
mod user_advocate;

pub use catalog::{AdvisorSpec, DEFAULT_CORE_ADVISORS, KeywordAdvisorSpec};
pub use engineer::EngineerAdvisor;
pub use finance::FinanceAdvisor;
pub use heuristics::recommendations;
pub use keyword::KeywordAdvisor;
pub use risk::RiskAdvisor;
pub use strategist::StrategistAdvisor;
pub use user_advocate::UserAdvocateAdvisor;

use crate::knowledge::KnowledgeLog;
use async_trait::async_trait;
use council_domain::{
    AdvisorProfile, DomainError, Entry, EntryFilter, EntryId, EntryKind, NewEntry, Opinion,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Errors raised by a single advisor
///
/// These never abort a round; the coordinator records the advisor as failed
/// and carries on with the others.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Advisor {advisor} failed to analyse the question: {reason}")]
    AnalysisFailed { advisor: String, reason: String },

    #[error("Advisor {advisor} could not be constructed: {reason}")]
    Construction { advisor: String, reason: String },

    #[error("Knowledge log rejected a write: {0}")]
    Log(#[from] DomainError),
}

/// Thresholds and limits shared by every advisor's posting protocol
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorProtocol {
    /// Minimum confidence for an opinion to be posted as a recommendation
    pub recommendation_threshold: f64,
    /// Minimum confidence for a dissenter to post a reflection
    pub reflection_threshold: f64,
    /// How many recent topic entries an advisor reads before analysing
    pub related_entries_limit: usize,
}

impl Default for AdvisorProtocol {
    fn default() -> Self {
        Self {
            recommendation_threshold: 0.6,
            reflection_threshold: 0.7,
            related_entries_limit: 20,
        }
    }
}

/// Topic that receives reflections for a round topic
pub fn reflections_topic(topic: &str) -> String {
    format!("{}_reflections", topic)
}

#[async_trait]
pub trait Advisor: Send + Sync {
    fn profile(&self) -> &AdvisorProfile;

    fn id(&self) -> &str {
        &self.profile().id
    }

    /// Produce an opinion from the question, its context and what has
    /// already been said about the topic (newest first).
    async fn analyze(
        &self,
        question: &str,
        context: &Map<String, Value>,
        related: &[Entry],
    ) -> Result<Opinion, AdvisorError>;

    /// Relevance of this advisor to the question, in [0, 1]
    fn expertise_weight(&self, question: &str, context: &Map<String, Value>) -> f64;

    /// Read, analyse, then post the opinion as one batch of entries:
    /// an insight, a recommendation when confident enough, and one concern
    /// per listed concern.
    async fn deliberate(
        &self,
        log: &KnowledgeLog,
        topic: &str,
        question: &str,
        context: &Map<String, Value>,
        protocol: &AdvisorProtocol,
    ) -> Result<Opinion, AdvisorError> {
        let related = log.read(&EntryFilter::topic(topic).limit(protocol.related_entries_limit));
        let mut opinion = self.analyze(question, context, &related).await?.clamped();
        opinion.advisor_id = self.profile().id.clone();
        opinion.advisor_name = self.profile().name.clone();

        let question_entry = related
            .iter()
            .find(|e| e.kind == EntryKind::Question)
            .map(|e| e.id);

        let drafts = opinion_entries(&opinion, question_entry, protocol);
        let ids = log.post_batch(topic, drafts)?;
        debug!(
            "Advisor {} posted {} entries to '{}'",
            opinion.advisor_id,
            ids.len(),
            topic
        );
        Ok(opinion)
    }

    /// Post a reflection to `<topic>_reflections` when this advisor's own
    /// recommendation lost and it had been confident about it.
    async fn reflect_on_consensus(
        &self,
        log: &KnowledgeLog,
        topic: &str,
        decision: &str,
        metadata: &Map<String, Value>,
        own: &Opinion,
        protocol: &AdvisorProtocol,
    ) -> Result<Option<EntryId>, AdvisorError> {
        if own.recommendation == decision || own.confidence <= protocol.reflection_threshold {
            return Ok(None);
        }

        let content = format!(
            "{} recommended \"{}\" ({:.0}% confident) but the council chose \"{}\"",
            self.profile().name,
            own.recommendation,
            own.confidence * 100.0,
            decision
        );
        let draft = NewEntry::new(self.id(), EntryKind::Insight, content)
            .with_confidence(own.confidence)
            .with_metadata("original_topic", topic)
            .with_metadata("own_recommendation", own.recommendation.as_str())
            .with_metadata("final_decision", decision)
            .with_metadata("decision", Value::Object(metadata.clone()))
            .with_tag("reflection");

        let id = log.post(&reflections_topic(topic), draft)?;
        Ok(Some(id))
    }
}

fn opinion_entries(
    opinion: &Opinion,
    question_entry: Option<EntryId>,
    protocol: &AdvisorProtocol,
) -> Vec<NewEntry> {
    let link = |draft: NewEntry| match question_entry {
        Some(id) => draft.with_reference(id),
        None => draft,
    };
    let insight_text = if opinion.rationale.is_empty() {
        opinion.recommendation.clone()
    } else {
        opinion.rationale.clone()
    };

    let mut drafts = vec![link(
        NewEntry::new(&opinion.advisor_id, EntryKind::Insight, insight_text)
            .with_confidence(opinion.confidence)
            .with_metadata("recommendation", opinion.recommendation.as_str())
            .with_metadata("priority", opinion.priority.as_str())
            .with_metadata("opportunities", opinion.opportunities.clone())
            .with_tags(opinion.tags.iter().cloned()),
    )];

    if opinion.confidence >= protocol.recommendation_threshold {
        drafts.push(link(
            NewEntry::new(
                &opinion.advisor_id,
                EntryKind::Recommendation,
                &opinion.recommendation,
            )
            .with_confidence(opinion.confidence)
            .with_metadata("priority", opinion.priority.as_str())
            .with_metadata("supporting_data", Value::Object(opinion.supporting_data.clone())),
        ));
    }

    for concern in &opinion.concerns {
        drafts.push(link(
            NewEntry::new(&opinion.advisor_id, EntryKind::Concern, concern)
                .with_confidence(opinion.confidence),
        ));
    }
    drafts
}
