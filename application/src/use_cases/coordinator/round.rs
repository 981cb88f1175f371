//! Round mechanics: advisor selection, recall enrichment, concurrent
//! dispatch under a deadline, and weighting.

use super::Coordinator;
use crate::advisors::{Advisor, AdvisorError};
use crate::ports::memory_recall::enrich_context;
use crate::ports::progress::DeliberationProgress;
use council_domain::{Opinion, SelectionMode};
use futures::FutureExt;
use futures::future::join_all;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

/// What came back from the advisors before the deadline
pub(super) struct RoundOutcome {
    /// In selection order
    pub opinions: Vec<Opinion>,
    pub failed: Vec<String>,
    pub timed_out: Vec<String>,
}

impl Coordinator {
    /// Pick the advisors for a round.
    ///
    /// Named advisors win when given; unknown names are skipped with a
    /// warning. Otherwise core-only mode takes the core set plus every
    /// advisor whose expertise overlaps the question, and full mode takes
    /// everyone.
    pub(super) fn select_advisors(
        &self,
        question: &str,
        required: Option<&[String]>,
    ) -> Vec<Arc<dyn Advisor>> {
        let registry = self.read_registry();

        if let Some(ids) = required.filter(|ids| !ids.is_empty()) {
            let mut chosen: Vec<Arc<dyn Advisor>> = Vec::new();
            for id in ids {
                if chosen.iter().any(|a| a.id() == id) {
                    continue;
                }
                match registry.find(id) {
                    Some(advisor) => chosen.push(advisor),
                    None => warn!("Requested advisor '{}' is not registered; skipping", id),
                }
            }
            return chosen;
        }

        match self.config.selection {
            SelectionMode::Full => registry.advisors.clone(),
            SelectionMode::Core => registry
                .advisors
                .iter()
                .filter(|a| self.config.is_core(a.id()) || a.profile().overlaps(question))
                .cloned()
                .collect(),
        }
    }

    /// Per-advisor context, enriched with recalled facts.
    ///
    /// Returns the contexts in selection order and the number of facts recalled.
    pub(super) async fn recall_contexts(
        &self,
        selected: &[Arc<dyn Advisor>],
        question: &str,
        context: &Map<String, Value>,
    ) -> (Vec<Map<String, Value>>, usize) {
        if self.config.recall_limit == 0 {
            return (vec![context.clone(); selected.len()], 0);
        }

        let lookups = selected.iter().map(|advisor| {
            self.recall
                .recall(advisor.id(), question, context, self.config.recall_limit)
        });
        let results = join_all(lookups).await;

        let mut total = 0;
        let contexts = selected
            .iter()
            .zip(results)
            .map(|(advisor, result)| match result {
                Ok(facts) => {
                    total += facts.len();
                    enrich_context(context, &facts)
                }
                Err(e) => {
                    warn!("Memory recall failed for {}: {}", advisor.id(), e);
                    context.clone()
                }
            })
            .collect();
        (contexts, total)
    }

    /// Run every selected advisor concurrently until all finish or the
    /// deadline expires. Advisors still running at the deadline are
    /// cancelled and reported as timed out.
    pub(super) async fn dispatch(
        &self,
        selected: &[Arc<dyn Advisor>],
        contexts: Vec<Map<String, Value>>,
        topic: &str,
        question: &str,
        deadline: Duration,
        progress: &dyn DeliberationProgress,
    ) -> RoundOutcome {
        let mut join_set = JoinSet::new();

        for (advisor, context) in selected.iter().zip(contexts) {
            let advisor = Arc::clone(advisor);
            let log = Arc::clone(&self.log);
            let protocol = self.config.protocol.clone();
            let topic = topic.to_string();
            let question = question.to_string();

            join_set.spawn(async move {
                let id = advisor.id().to_string();
                let outcome = AssertUnwindSafe(
                    advisor.deliberate(&log, &topic, &question, &context, &protocol),
                )
                .catch_unwind()
                .await;
                let result = outcome.unwrap_or_else(|_| {
                    Err(AdvisorError::AnalysisFailed {
                        advisor: id.clone(),
                        reason: "advisor panicked".to_string(),
                    })
                });
                (id, result)
            });
        }

        let order: HashMap<String, usize> = selected
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id().to_string(), i))
            .collect();
        let mut pending: Vec<String> = selected.iter().map(|a| a.id().to_string()).collect();
        let mut opinions = Vec::new();
        let mut failed = Vec::new();
        let mut timed_out = Vec::new();
        let expires = Instant::now() + deadline;

        loop {
            match timeout_at(expires, join_set.join_next()).await {
                Ok(Some(Ok((id, Ok(opinion))))) => {
                    info!("Advisor {} responded: {}", id, opinion.recommendation);
                    progress.on_advisor_complete(&id, true);
                    pending.retain(|p| p != &id);
                    opinions.push(opinion);
                }
                Ok(Some(Ok((id, Err(e))))) => {
                    warn!("Advisor {} failed: {}", id, e);
                    progress.on_advisor_complete(&id, false);
                    pending.retain(|p| p != &id);
                    failed.push(id);
                }
                Ok(Some(Err(e))) => {
                    warn!("Task join error: {}", e);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        "Deadline of {:?} expired; abandoning {}",
                        deadline,
                        pending.join(", ")
                    );
                    join_set.shutdown().await;
                    progress.on_deadline(&pending);
                    timed_out = std::mem::take(&mut pending);
                    break;
                }
            }
        }

        opinions.sort_by_key(|o| order.get(&o.advisor_id).copied().unwrap_or(usize::MAX));
        debug!(
            "Round on '{}': {} responded, {} failed, {} timed out",
            topic,
            opinions.len(),
            failed.len(),
            timed_out.len()
        );

        RoundOutcome {
            opinions,
            failed,
            timed_out,
        }
    }

    /// Weight per responder: expertise relevance plus data and confidence bonuses
    pub(super) fn weigh(
        &self,
        selected: &[Arc<dyn Advisor>],
        contexts: &[Map<String, Value>],
        question: &str,
        opinions: &[Opinion],
    ) -> HashMap<String, f64> {
        opinions
            .iter()
            .map(|opinion| {
                let expertise = selected
                    .iter()
                    .zip(contexts)
                    .find(|(a, _)| a.id() == opinion.advisor_id)
                    .map(|(a, context)| a.expertise_weight(question, context))
                    .unwrap_or(0.0);
                let weight = self.config.weighting.weigh(
                    expertise,
                    opinion.supporting_data.len(),
                    opinion.confidence,
                );
                (opinion.advisor_id.clone(), weight)
            })
            .collect()
    }
}
