//! Council coordinator
//!
//! Owns the advisor registry and the bounded history of completed rounds,
//! and runs deliberation rounds against the shared knowledge log:
//!
//! 1. select advisors and enrich their context from memory recall
//! 2. post the question and run every advisor concurrently under a deadline
//! 3. weigh the opinions that came back and aggregate them into a decision
//! 4. post the consensus, let confident dissenters reflect, record the round

mod explain;
mod round;
mod types;

pub use explain::{ExplainedDecision, Explanation};
pub use types::{DeliberateError, DeliberateInput, InitReport};

use crate::advisors::Advisor;
use crate::config::CouncilConfig;
use crate::knowledge::KnowledgeLog;
use crate::ports::decision_store::{DecisionStore, NoDecisionStore};
use crate::ports::memory_recall::{MemoryRecall, NoRecall};
use crate::ports::progress::{DeliberationProgress, NoProgress};
use chrono::Utc;
use council_domain::{
    AdvisorPerformance, Aggregator, Decision, DeliberationRecord, DeliberationStats, DomainError,
    EntryKind, NewEntry, Opinion, PerformanceLedger, Question,
};
use futures::future::join_all;
use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Author name used for question and consensus entries
pub const COORDINATOR_AUTHOR: &str = "coordinator";

#[derive(Default)]
struct Registry {
    initialized: bool,
    /// In registration order
    advisors: Vec<Arc<dyn Advisor>>,
}

impl Registry {
    fn find(&self, id: &str) -> Option<Arc<dyn Advisor>> {
        self.advisors.iter().find(|a| a.id() == id).cloned()
    }

    fn ids(&self) -> Vec<String> {
        self.advisors.iter().map(|a| a.id().to_string()).collect()
    }
}

struct History {
    records: VecDeque<DeliberationRecord>,
    performance: PerformanceLedger,
}

/// Runs deliberation rounds
///
/// All methods take `&self`; the coordinator can be shared behind an `Arc`.
pub struct Coordinator {
    config: CouncilConfig,
    log: Arc<KnowledgeLog>,
    aggregator: Aggregator,
    recall: Arc<dyn MemoryRecall>,
    store: Arc<dyn DecisionStore>,
    registry: RwLock<Registry>,
    history: Mutex<History>,
    topic_counter: AtomicU64,
    /// Persistence tasks not yet awaited
    persisting: Mutex<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    pub fn new(config: CouncilConfig, log: Arc<KnowledgeLog>) -> Self {
        let aggregator = Aggregator::new(config.aggregation.clone());
        Self {
            config,
            log,
            aggregator,
            recall: Arc::new(NoRecall),
            store: Arc::new(NoDecisionStore),
            registry: RwLock::new(Registry::default()),
            history: Mutex::new(History {
                records: VecDeque::new(),
                performance: PerformanceLedger::new(),
            }),
            topic_counter: AtomicU64::new(0),
            persisting: Mutex::new(Vec::new()),
        }
    }

    pub fn with_recall(mut self, recall: Arc<dyn MemoryRecall>) -> Self {
        self.recall = recall;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn DecisionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &CouncilConfig {
        &self.config
    }

    pub fn log(&self) -> &Arc<KnowledgeLog> {
        &self.log
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Registry ====================

    /// Build the advisor registry from the configured advisors.
    ///
    /// Advisors that fail to construct are logged and left out. Calling this
    /// again is a no-op.
    pub fn initialize(&self) -> InitReport {
        let mut registry = self.write_registry();
        if registry.initialized {
            debug!("Coordinator already initialised");
            return InitReport {
                registered: registry.ids(),
                skipped: Vec::new(),
                already_initialized: true,
            };
        }

        let mut skipped = Vec::new();
        for spec in &self.config.advisors {
            let id = spec.id().to_string();
            if self.config.initialize_core_only && !self.config.is_core(&id) {
                continue;
            }
            if registry.find(&id).is_some() {
                warn!("Duplicate advisor id '{}'; keeping the first", id);
                skipped.push((id, "duplicate advisor id".to_string()));
                continue;
            }
            match spec.build() {
                Ok(advisor) => registry.advisors.push(advisor),
                Err(e) => {
                    warn!("Skipping advisor '{}': {}", id, e);
                    skipped.push((id, e.to_string()));
                }
            }
        }
        registry.initialized = true;

        let registered = registry.ids();
        if registered.is_empty() {
            warn!("No advisors could be constructed; the council is degraded");
        } else {
            info!(
                "Council initialised with {} advisors: {}",
                registered.len(),
                registered.join(", ")
            );
        }

        InitReport {
            registered,
            skipped,
            already_initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.read_registry().initialized
    }

    /// Initialised, but with no advisor to consult
    pub fn is_degraded(&self) -> bool {
        let registry = self.read_registry();
        registry.initialized && registry.advisors.is_empty()
    }

    /// Register an advisor. Returns false if its id is already taken.
    pub fn add_advisor(&self, advisor: Arc<dyn Advisor>) -> bool {
        let mut registry = self.write_registry();
        if registry.find(advisor.id()).is_some() {
            return false;
        }
        info!("Registered advisor '{}'", advisor.id());
        registry.advisors.push(advisor);
        true
    }

    pub fn remove_advisor(&self, advisor_id: &str) -> Option<Arc<dyn Advisor>> {
        let mut registry = self.write_registry();
        let position = registry.advisors.iter().position(|a| a.id() == advisor_id)?;
        info!("Removed advisor '{}'", advisor_id);
        Some(registry.advisors.remove(position))
    }

    pub fn advisor_ids(&self) -> Vec<String> {
        self.read_registry().ids()
    }

    /// Every registered advisor, in registration order
    pub fn advisors(&self) -> Vec<Arc<dyn Advisor>> {
        self.read_registry().advisors.clone()
    }

    // ==================== Deliberation ====================

    /// Run a round with default (no-op) progress
    pub async fn deliberate(
        &self,
        input: DeliberateInput,
    ) -> Result<DeliberationRecord, DeliberateError> {
        self.deliberate_with_progress(input, &NoProgress).await
    }

    /// Run a round with progress callbacks
    pub async fn deliberate_with_progress(
        &self,
        input: DeliberateInput,
        progress: &dyn DeliberationProgress,
    ) -> Result<DeliberationRecord, DeliberateError> {
        let started = Instant::now();
        if !self.is_initialized() {
            self.initialize();
        }

        let question = Question::try_new(input.question.as_str())?;
        let topic = match input.topic {
            Some(topic) if topic.trim().is_empty() => {
                return Err(DeliberateError::InvalidTopic(topic));
            }
            Some(topic) => topic,
            None => self.next_topic(),
        };
        let method = input.method.unwrap_or(self.config.default_method);
        let deadline = input.deadline.unwrap_or(self.config.default_deadline);

        let selected = self.select_advisors(question.content(), input.required_advisors.as_deref());
        if selected.is_empty() {
            return Err(DeliberateError::NoAdvisors);
        }
        let selected_ids: Vec<String> = selected.iter().map(|a| a.id().to_string()).collect();
        info!(
            "Deliberating on '{}' with {} advisors ({})",
            topic,
            selected.len(),
            method
        );
        progress.on_round_start(&topic, &selected_ids);

        let (contexts, recalled_facts) = self
            .recall_contexts(&selected, question.content(), &input.context)
            .await;

        let question_entry = self.log.post(
            &topic,
            NewEntry::new(COORDINATOR_AUTHOR, EntryKind::Question, question.content())
                .with_metadata("context", Value::Object(input.context.clone()))
                .with_metadata("advisors", selected_ids.clone()),
        )?;

        let outcome = self
            .dispatch(
                &selected,
                contexts.clone(),
                &topic,
                question.content(),
                deadline,
                progress,
            )
            .await;

        if outcome.opinions.is_empty() {
            return Err(if outcome.timed_out.is_empty() {
                DeliberateError::NoResponders {
                    selected: selected_ids,
                    failed: outcome.failed,
                }
            } else {
                DeliberateError::RoundTimeout {
                    deadline,
                    selected: selected_ids,
                }
            });
        }

        let weights = self.weigh(&selected, &contexts, question.content(), &outcome.opinions);
        let decision = match self.aggregator.reduce(&outcome.opinions, &weights, method) {
            Err(DomainError::ZeroTotalWeight) => {
                warn!(
                    "Weighted score on '{}' is zero; deciding by head count",
                    topic
                );
                self.aggregator.reduce_by_count(&outcome.opinions, method)
            }
            result => result,
        }
        .map_err(DeliberateError::Aggregation)?;
        info!(
            "Decision on '{}': {} ({:.0}% confidence, {:.0}% agreement)",
            topic,
            decision.recommendation,
            decision.confidence * 100.0,
            decision.agreement * 100.0
        );
        progress.on_round_complete(&decision);

        let metadata = decision_metadata(&decision);
        let mut consensus = NewEntry::new(
            COORDINATOR_AUTHOR,
            EntryKind::Consensus,
            &decision.recommendation,
        )
        .with_confidence(decision.confidence)
        .with_reference(question_entry);
        consensus.metadata = metadata.clone();
        self.log.post(&topic, consensus)?;

        self.collect_reflections(&selected, &topic, &decision, &metadata, &outcome.opinions)
            .await;

        let stats = DeliberationStats {
            selected: selected_ids,
            responded: outcome.opinions.iter().map(|o| o.advisor_id.clone()).collect(),
            failed: outcome.failed,
            timed_out: outcome.timed_out,
            weights: weights.into_iter().collect(),
            recalled_facts,
        };
        let record = DeliberationRecord {
            topic,
            question: question.into_content(),
            context: input.context,
            decision,
            opinions: outcome.opinions,
            elapsed: started.elapsed(),
            completed_at: Utc::now(),
            stats,
        };

        self.remember(&record);
        self.persist(record.clone());
        Ok(record)
    }

    /// Let every dissenter reflect on the decision, concurrently
    async fn collect_reflections(
        &self,
        selected: &[Arc<dyn Advisor>],
        topic: &str,
        decision: &Decision,
        metadata: &Map<String, Value>,
        opinions: &[Opinion],
    ) {
        let reflections = decision.dissenting.iter().filter_map(|id| {
            let advisor = selected.iter().find(|a| a.id() == id)?;
            let opinion = opinions.iter().find(|o| &o.advisor_id == id)?;
            Some(async move {
                let result = advisor
                    .reflect_on_consensus(
                        &self.log,
                        topic,
                        &decision.recommendation,
                        metadata,
                        opinion,
                        &self.config.protocol,
                    )
                    .await;
                (id, result)
            })
        });

        for (id, result) in join_all(reflections).await {
            match result {
                Ok(Some(entry)) => debug!("Advisor {} reflected on the decision ({})", id, entry),
                Ok(None) => {}
                Err(e) => warn!("Advisor {} could not post a reflection: {}", id, e),
            }
        }
    }

    fn next_topic(&self) -> String {
        let n = self.topic_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("deliberation_{}_{}", Utc::now().format("%Y%m%d%H%M%S"), n)
    }

    fn remember(&self, record: &DeliberationRecord) {
        let mut history = self.lock_history();
        history
            .performance
            .record(&record.decision, &record.opinions);
        history.records.push_back(record.clone());
        while history.records.len() > self.config.history_capacity {
            history.records.pop_front();
        }
    }

    /// Hand the record to the decision store without waiting for it
    fn persist(&self, record: DeliberationRecord) {
        let store = Arc::clone(&self.store);
        let handle = tokio::spawn(async move {
            if let Err(e) = store.persist(&record).await {
                warn!("Failed to persist deliberation '{}': {}", record.topic, e);
            }
        });

        let mut persisting = self.persisting.lock().unwrap_or_else(PoisonError::into_inner);
        persisting.retain(|h| !h.is_finished());
        persisting.push(handle);
    }

    /// Wait for every pending persistence task. Call before shutting down.
    pub async fn flush_persistence(&self) {
        let pending = std::mem::take(
            &mut *self.persisting.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for handle in pending {
            if let Err(e) = handle.await {
                warn!("Persistence task failed: {}", e);
            }
        }
    }

    // ==================== Queries ====================

    /// Up to `limit` most recent rounds, newest first
    pub fn history(&self, limit: usize) -> Vec<DeliberationRecord> {
        self.lock_history()
            .records
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn advisor_performance(&self) -> Vec<AdvisorPerformance> {
        self.lock_history().performance.iter().cloned().collect()
    }

    /// Narrative of a past round, rebuilt from its consensus trail
    pub fn explain(&self, topic: &str) -> Option<Explanation> {
        Explanation::from_trail(topic, &self.log.consensus_trail(topic))
    }
}

fn decision_metadata(decision: &Decision) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("agreement".into(), json!(decision.agreement));
    metadata.insert("method".into(), json!(decision.method.as_str()));
    metadata.insert("resolved_by".into(), json!(decision.resolved_by.as_str()));
    metadata.insert("priority".into(), json!(decision.priority.as_str()));
    metadata.insert("supporting".into(), json!(decision.supporting));
    metadata.insert("dissenting".into(), json!(decision.dissenting));
    metadata.insert("rationale".into(), json!(decision.rationale));
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisors::{AdvisorError, AdvisorSpec, KeywordAdvisorSpec};
    use crate::ports::decision_store::StoreError;
    use crate::ports::memory_recall::{RECALLED_FACTS_KEY, RecallError, RememberedFact};
    use async_trait::async_trait;
    use council_domain::{AdvisorProfile, AggregationMethod, Entry, SelectionMode};
    use std::time::Duration;

    enum Behaviour {
        Answer,
        Fail,
        Panic,
        Sleep(Duration),
    }

    struct Scripted {
        profile: AdvisorProfile,
        recommendation: String,
        confidence: f64,
        weight: f64,
        behaviour: Behaviour,
    }

    impl Scripted {
        fn new(id: &str, recommendation: &str, confidence: f64) -> Self {
            Self {
                profile: AdvisorProfile::new(id, id.to_uppercase(), ["testing"]),
                recommendation: recommendation.to_string(),
                confidence,
                weight: 1.0,
                behaviour: Behaviour::Answer,
            }
        }

        fn failing(id: &str) -> Self {
            Self {
                behaviour: Behaviour::Fail,
                ..Self::new(id, "unused", 0.5)
            }
        }

        fn panicking(id: &str) -> Self {
            Self {
                behaviour: Behaviour::Panic,
                ..Self::new(id, "unused", 0.5)
            }
        }

        fn slow(id: &str, delay: Duration) -> Self {
            Self {
                behaviour: Behaviour::Sleep(delay),
                ..Self::new(id, "Too late", 0.9)
            }
        }

        fn weighted(mut self, weight: f64) -> Self {
            self.weight = weight;
            self
        }
    }

    #[async_trait]
    impl Advisor for Scripted {
        fn profile(&self) -> &AdvisorProfile {
            &self.profile
        }

        async fn analyze(
            &self,
            _question: &str,
            context: &Map<String, Value>,
            _related: &[Entry],
        ) -> Result<Opinion, AdvisorError> {
            match self.behaviour {
                Behaviour::Answer => {}
                Behaviour::Fail => {
                    return Err(AdvisorError::AnalysisFailed {
                        advisor: self.profile.id.clone(),
                        reason: "scripted failure".into(),
                    });
                }
                Behaviour::Panic => panic!("scripted panic"),
                Behaviour::Sleep(delay) => tokio::time::sleep(delay).await,
            }
            Ok(Opinion::new(
                &self.profile.id,
                &self.profile.name,
                &self.recommendation,
                self.confidence,
            )
            .with_rationale("scripted")
            .with_data("saw_recalled", context.contains_key(RECALLED_FACTS_KEY)))
        }

        fn expertise_weight(&self, _question: &str, _context: &Map<String, Value>) -> f64 {
            self.weight
        }
    }

    fn test_config() -> CouncilConfig {
        CouncilConfig::default()
            .with_advisors(Vec::new())
            .with_selection(SelectionMode::Full)
    }

    fn council_with(config: CouncilConfig, advisors: Vec<Scripted>) -> Coordinator {
        let coordinator = Coordinator::new(config, Arc::new(KnowledgeLog::new()));
        for advisor in advisors {
            assert!(coordinator.add_advisor(Arc::new(advisor)));
        }
        coordinator.initialize();
        coordinator
    }

    fn council(advisors: Vec<Scripted>) -> Coordinator {
        council_with(test_config(), advisors)
    }

    #[tokio::test]
    async fn test_unanimous_round_posts_full_trail() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.8),
            Scripted::new("b", "Use X", 0.8),
            Scripted::new("c", "Use X", 0.8),
        ]);

        let record = coordinator
            .deliberate(DeliberateInput::new("Which database?").with_topic("db"))
            .await
            .unwrap();

        assert_eq!(record.decision.recommendation, "Use X");
        assert_eq!(record.decision.resolved_by, AggregationMethod::Unanimous);
        assert_eq!(record.stats.responded, vec!["a", "b", "c"]);
        assert_eq!(record.stats.weights["a"], 1.0);

        let trail = coordinator.log().consensus_trail("db");
        assert_eq!(trail.first().unwrap().kind, EntryKind::Question);
        assert_eq!(trail.last().unwrap().kind, EntryKind::Consensus);
        let stats = coordinator.log().statistics(Some("db"));
        assert_eq!(stats.kind_count(EntryKind::Insight), 3);
        assert_eq!(stats.kind_count(EntryKind::Recommendation), 3);
        assert_eq!(stats.kind_count(EntryKind::Consensus), 1);
    }

    #[tokio::test]
    async fn test_failing_and_panicking_advisors_do_not_abort_round() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.8),
            Scripted::failing("b"),
            Scripted::new("c", "Use X", 0.7),
            Scripted::panicking("d"),
        ]);

        let record = coordinator
            .deliberate(DeliberateInput::new("Which database?"))
            .await
            .unwrap();

        let mut failed = record.stats.failed.clone();
        failed.sort();
        assert_eq!(failed, vec!["b", "d"]);
        assert_eq!(record.decision.supporting, vec!["a", "c"]);
        assert!(record.decision.dissenting.is_empty());
    }

    #[tokio::test]
    async fn test_deadline_abandons_slow_advisors() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.8),
            Scripted::slow("b", Duration::from_secs(5)),
        ]);

        let record = coordinator
            .deliberate(
                DeliberateInput::new("Which database?")
                    .with_topic("slow")
                    .with_deadline(Duration::from_millis(200)),
            )
            .await
            .unwrap();

        assert!(record.elapsed < Duration::from_secs(5));
        assert_eq!(record.stats.timed_out, vec!["b"]);
        assert_eq!(record.decision.supporting, vec!["a"]);
        let from_b = coordinator
            .log()
            .read(&council_domain::EntryFilter::topic("slow").by_author("b"));
        assert!(from_b.is_empty());
    }

    #[tokio::test]
    async fn test_deadline_with_no_responses_is_timeout() {
        let coordinator = council(vec![Scripted::slow("a", Duration::from_secs(5))]);
        let err = coordinator
            .deliberate(DeliberateInput::new("q").with_deadline(Duration::from_millis(50)))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliberateError::RoundTimeout { ref selected, .. } if selected == &["a"]));
    }

    #[tokio::test]
    async fn test_all_failed_is_no_responders() {
        let coordinator = council(vec![Scripted::failing("a"), Scripted::failing("b")]);
        let err = coordinator
            .deliberate(DeliberateInput::new("q"))
            .await
            .unwrap_err();
        match err {
            DeliberateError::NoResponders { selected, failed } => {
                assert_eq!(selected.len(), 2);
                assert_eq!(failed.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(coordinator.history(10).is_empty());
    }

    #[tokio::test]
    async fn test_history_is_bounded_and_newest_first() {
        let coordinator = council_with(
            test_config().with_history_capacity(2),
            vec![Scripted::new("a", "Use X", 0.8)],
        );
        for topic in ["r1", "r2", "r3"] {
            coordinator
                .deliberate(DeliberateInput::new("q").with_topic(topic))
                .await
                .unwrap();
        }

        let topics: Vec<String> = coordinator.history(10).into_iter().map(|r| r.topic).collect();
        assert_eq!(topics, vec!["r3", "r2"]);
        assert_eq!(coordinator.history(1).len(), 1);
    }

    #[tokio::test]
    async fn test_dissent_is_tracked_and_reflected() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.8),
            Scripted::new("b", "Use X", 0.8),
            Scripted::new("c", "Use Y", 0.9),
        ]);

        let record = coordinator
            .deliberate(DeliberateInput::new("Which database?").with_topic("pick"))
            .await
            .unwrap();
        assert_eq!(record.decision.recommendation, "Use X");
        assert_eq!(record.decision.resolved_by, AggregationMethod::Supermajority);
        assert_eq!(record.decision.dissenting, vec!["c"]);

        let performance = coordinator.advisor_performance();
        let c = performance.iter().find(|p| p.advisor_id == "c").unwrap();
        assert_eq!(c.dissented, 1);
        let a = performance.iter().find(|p| p.advisor_id == "a").unwrap();
        assert_eq!(a.supported, 1);

        let reflections = coordinator.log().consensus_trail("pick_reflections");
        assert_eq!(reflections.len(), 1);
        assert_eq!(reflections[0].author, "c");
    }

    #[tokio::test]
    async fn test_explain_rebuilds_narrative() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.8),
            Scripted::new("b", "Use X", 0.8),
        ]);
        coordinator
            .deliberate(DeliberateInput::new("Which database?").with_topic("launch"))
            .await
            .unwrap();

        let explanation = coordinator.explain("launch").unwrap();
        assert_eq!(explanation.question.as_deref(), Some("Which database?"));
        assert_eq!(explanation.recommendations.len(), 2);
        let decision = explanation.decision.as_ref().unwrap();
        assert_eq!(decision.recommendation, "Use X");
        assert_eq!(decision.agreement, Some(1.0));
        assert!(explanation.to_string().contains("Decision: \"Use X\""));

        assert!(coordinator.explain("missing").is_none());
    }

    #[tokio::test]
    async fn test_required_advisors_skip_unknown_ids() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.8),
            Scripted::new("b", "Use Y", 0.8),
        ]);

        let record = coordinator
            .deliberate(DeliberateInput::new("q").with_advisors(["a", "ghost"]))
            .await
            .unwrap();
        assert_eq!(record.stats.selected, vec!["a"]);

        let err = coordinator
            .deliberate(DeliberateInput::new("q").with_advisors(["ghost"]))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliberateError::NoAdvisors));
    }

    #[tokio::test]
    async fn test_weights_include_confidence_bonus() {
        let coordinator = council(vec![Scripted::new("a", "Use X", 0.9).weighted(0.5)]);
        let record = coordinator.deliberate(DeliberateInput::new("q")).await.unwrap();
        assert!((record.stats.weights["a"] - 0.55).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_invalid_question_and_topic() {
        let coordinator = council(vec![Scripted::new("a", "Use X", 0.8)]);

        let err = coordinator.deliberate(DeliberateInput::new("  ")).await.unwrap_err();
        assert!(matches!(err, DeliberateError::InvalidQuestion(_)));

        let err = coordinator
            .deliberate(DeliberateInput::new("q").with_topic(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliberateError::InvalidTopic(_)));
    }

    #[tokio::test]
    async fn test_generated_topics_are_unique() {
        let coordinator = council(vec![Scripted::new("a", "Use X", 0.8)]);
        let first = coordinator.deliberate(DeliberateInput::new("q")).await.unwrap();
        let second = coordinator.deliberate(DeliberateInput::new("q")).await.unwrap();
        assert!(first.topic.starts_with("deliberation_"));
        assert_ne!(first.topic, second.topic);
    }

    #[test]
    fn test_initialize_skips_broken_advisors_and_is_idempotent() {
        let broken = AdvisorSpec::Keyword(KeywordAdvisorSpec {
            id: "legal".into(),
            name: "Legal".into(),
            expertise: Vec::new(),
            recommendation: "Ask counsel".into(),
            concerns: Vec::new(),
            confidence: 0.6,
        });
        let mut specs = AdvisorSpec::builtin();
        specs.push(broken.clone());
        specs.push(AdvisorSpec::Risk);
        let coordinator = Coordinator::new(
            CouncilConfig::default().with_advisors(specs),
            Arc::new(KnowledgeLog::new()),
        );

        let report = coordinator.initialize();
        assert_eq!(report.registered.len(), 5);
        assert_eq!(report.skipped.len(), 2);
        assert!(!report.is_degraded());

        let again = coordinator.initialize();
        assert!(again.already_initialized);
        assert_eq!(again.registered, report.registered);

        let degraded = Coordinator::new(
            CouncilConfig::default().with_advisors(vec![broken]),
            Arc::new(KnowledgeLog::new()),
        );
        assert!(degraded.initialize().is_degraded());
        assert!(degraded.is_degraded());
    }

    #[tokio::test]
    async fn test_degraded_council_has_no_advisors() {
        let coordinator = Coordinator::new(test_config(), Arc::new(KnowledgeLog::new()));
        let err = coordinator.deliberate(DeliberateInput::new("q")).await.unwrap_err();
        assert!(matches!(err, DeliberateError::NoAdvisors));
        assert!(coordinator.is_degraded());
    }

    #[test]
    fn test_add_and_remove_advisors() {
        let coordinator = council(vec![Scripted::new("a", "Use X", 0.8)]);
        assert!(!coordinator.add_advisor(Arc::new(Scripted::new("a", "dup", 0.1))));
        assert!(coordinator.add_advisor(Arc::new(Scripted::new("b", "Use Y", 0.1))));
        assert_eq!(coordinator.advisor_ids(), vec!["a", "b"]);
        assert!(coordinator.remove_advisor("a").is_some());
        assert!(coordinator.remove_advisor("a").is_none());
        assert_eq!(coordinator.advisor_ids(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_core_selection_adds_overlapping_experts() {
        let coordinator = Coordinator::new(CouncilConfig::default(), Arc::new(KnowledgeLog::new()));
        let record = coordinator
            .deliberate(DeliberateInput::new(
                "Should we cut the budget for the new pricing tiers?",
            ))
            .await
            .unwrap();

        assert_eq!(
            record.stats.selected,
            vec!["strategist", "risk", "engineer", "finance"]
        );
        assert_eq!(record.opinions.len(), 4);
    }

    struct FixedRecall {
        fail: bool,
    }

    #[async_trait]
    impl MemoryRecall for FixedRecall {
        async fn recall(
            &self,
            _advisor_id: &str,
            _question: &str,
            _context: &Map<String, Value>,
            limit: usize,
        ) -> Result<Vec<RememberedFact>, RecallError> {
            if self.fail {
                return Err(RecallError::Unavailable("offline".into()));
            }
            Ok((0..2.min(limit))
                .map(|i| RememberedFact::new("earlier", format!("fact {}", i), 0.5))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_recall_enriches_context() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.8),
            Scripted::new("b", "Use X", 0.8),
        ])
        .with_recall(Arc::new(FixedRecall { fail: false }));

        let record = coordinator.deliberate(DeliberateInput::new("q")).await.unwrap();
        assert_eq!(record.stats.recalled_facts, 4);
        assert_eq!(record.opinions[0].supporting_data["saw_recalled"], json!(true));
        assert!(!record.context.contains_key(RECALLED_FACTS_KEY));
    }

    #[tokio::test]
    async fn test_failed_recall_is_not_fatal() {
        let coordinator = council(vec![Scripted::new("a", "Use X", 0.8)])
            .with_recall(Arc::new(FixedRecall { fail: true }));

        let record = coordinator.deliberate(DeliberateInput::new("q")).await.unwrap();
        assert_eq!(record.stats.recalled_facts, 0);
        assert_eq!(record.opinions[0].supporting_data["saw_recalled"], json!(false));
    }

    #[tokio::test]
    async fn test_zero_expertise_weights_still_reach_a_decision() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.7).weighted(0.0),
            Scripted::new("b", "Use X", 0.7).weighted(0.0),
            Scripted::new("c", "Use Y", 0.7).weighted(0.0),
        ]);

        let record = coordinator.deliberate(DeliberateInput::new("q")).await.unwrap();

        assert_eq!(record.decision.recommendation, "Use X");
        assert_eq!(record.decision.resolved_by, AggregationMethod::Supermajority);
        assert!((record.decision.agreement - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(record.decision.dissenting, vec!["c"]);
        assert!(record.stats.weights.values().all(|&w| w == 0.0));
    }

    #[tokio::test]
    async fn test_zero_confidence_split_falls_back_to_head_count() {
        let coordinator = council(vec![
            Scripted::new("a", "Use X", 0.0).weighted(0.5),
            Scripted::new("b", "Use Y", 0.0).weighted(0.5),
            Scripted::new("c", "Use Y", 0.0).weighted(0.5),
        ]);

        for method in [AggregationMethod::WeightedMajority, AggregationMethod::ConfidenceWeighted] {
            let record = coordinator
                .deliberate(DeliberateInput::new("q").with_method(method))
                .await
                .unwrap();
            assert_eq!(record.decision.recommendation, "Use Y");
            assert_eq!(record.decision.method, method);
            assert_eq!(record.decision.resolved_by, AggregationMethod::WeightedMajority);
            assert!((record.decision.agreement - 2.0 / 3.0).abs() < 1e-9);
            assert_eq!(record.decision.confidence, 0.0);
        }

        let two = council(vec![
            Scripted::new("a", "Use X", 0.0).weighted(0.5),
            Scripted::new("b", "Use Y", 0.0).weighted(0.5),
        ]);
        let record = two.deliberate(DeliberateInput::new("q")).await.unwrap();
        assert_eq!(record.decision.agreement, 0.5);
        assert_eq!(record.opinions.len(), 2);
    }

    #[derive(Default)]
    struct RecordingStore {
        topics: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DecisionStore for RecordingStore {
        async fn persist(&self, record: &DeliberationRecord) -> Result<(), StoreError> {
            self.topics.lock().unwrap().push(record.topic.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_records_are_persisted() {
        let store = Arc::new(RecordingStore::default());
        let coordinator = council(vec![Scripted::new("a", "Use X", 0.8)])
            .with_store(Arc::clone(&store) as Arc<dyn DecisionStore>);

        coordinator
            .deliberate(DeliberateInput::new("q").with_topic("saved"))
            .await
            .unwrap();

        coordinator.flush_persistence().await;
        assert_eq!(*store.topics.lock().unwrap(), vec!["saved".to_string()]);
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl DeliberationProgress for RecordingProgress {
        fn on_round_start(&self, _topic: &str, selected: &[String]) {
            self.events.lock().unwrap().push(format!("start:{}", selected.len()));
        }

        fn on_advisor_complete(&self, advisor_id: &str, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}:{}", advisor_id, success));
        }

        fn on_round_complete(&self, decision: &Decision) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}", decision.recommendation));
        }
    }

    #[tokio::test]
    async fn test_progress_callbacks() {
        let coordinator = council(vec![Scripted::new("a", "Use X", 0.8), Scripted::failing("b")]);
        let progress = RecordingProgress::default();
        coordinator
            .deliberate_with_progress(DeliberateInput::new("q"), &progress)
            .await
            .unwrap();

        let mut events = progress.events.lock().unwrap().clone();
        assert_eq!(events.first().map(String::as_str), Some("start:2"));
        assert_eq!(events.last().map(String::as_str), Some("done:Use X"));
        events.sort();
        assert!(events.contains(&"a:true".to_string()));
        assert!(events.contains(&"b:false".to_string()));
    }
}
