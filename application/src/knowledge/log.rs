//! In-memory knowledge log
//!
//! Entries are partitioned by topic and kept in post order. A single coarse
//! mutex guards the storage; it is held for one read or write at a time and
//! never across an `.await`.

use chrono::Utc;
use council_domain::{
    DomainError, Entry, EntryFilter, EntryId, NewEntry, Relevance, TopicStatistics,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Buffered entries per subscriber before deliveries start being dropped
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 256;

/// Identifier of a live subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a topic subscription
///
/// Dropping it is equivalent to unsubscribing; the log prunes closed
/// subscribers on the next post.
pub struct Subscription {
    id: SubscriptionId,
    topic: String,
    receiver: mpsc::Receiver<Entry>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next entry posted to the topic
    pub async fn recv(&mut self) -> Option<Entry> {
        self.receiver.recv().await
    }

    /// Take an already-delivered entry without waiting
    pub fn try_recv(&mut self) -> Option<Entry> {
        self.receiver.try_recv().ok()
    }
}

struct Subscriber {
    id: SubscriptionId,
    sender: mpsc::Sender<Entry>,
}

#[derive(Default)]
struct LogState {
    /// Entries per topic, oldest first
    topics: HashMap<String, Vec<Entry>>,
    /// Entry id → topic, for lookups by id
    index: HashMap<EntryId, String>,
    subscribers: HashMap<String, Vec<Subscriber>>,
    next_entry: u64,
    next_subscription: u64,
}

impl LogState {
    fn append(&mut self, topic: &str, draft: NewEntry) -> Entry {
        self.next_entry += 1;
        let entry = Entry::from_draft(EntryId(self.next_entry), topic, Utc::now(), draft);
        self.index.insert(entry.id, topic.to_string());
        self.topics
            .entry(topic.to_string())
            .or_default()
            .push(entry.clone());
        entry
    }

    /// Fan an entry out without ever blocking the poster
    fn deliver(&mut self, entry: &Entry) {
        let Some(subscribers) = self.subscribers.get_mut(&entry.topic) else {
            return;
        };
        subscribers.retain(|sub| match sub.sender.try_send(entry.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(
                    "Subscriber {:?} on topic '{}' is full; dropping {}",
                    sub.id, entry.topic, entry.id
                );
                true
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Pruning closed subscriber {:?} on '{}'", sub.id, entry.topic);
                false
            }
        });
        if subscribers.is_empty() {
            self.subscribers.remove(&entry.topic);
        }
    }

    /// Drop subscribers whose receiver is gone, and topics left without any
    fn prune_subscribers(&mut self) {
        self.subscribers.retain(|_, subscribers| {
            subscribers.retain(|s| !s.sender.is_closed());
            !subscribers.is_empty()
        });
    }
}

/// Append-only, topic-partitioned store of facts
///
/// Safe to share between tasks behind an `Arc`.
pub struct KnowledgeLog {
    state: Mutex<LogState>,
    subscriber_capacity: usize,
}

impl Default for KnowledgeLog {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeLog {
    pub fn new() -> Self {
        Self::with_subscriber_capacity(DEFAULT_SUBSCRIBER_CAPACITY)
    }

    pub fn with_subscriber_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(LogState::default()),
            subscriber_capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one entry to `topic`
    ///
    /// # Errors
    /// [`DomainError::InvalidTopic`] if the topic is empty or whitespace.
    pub fn post(&self, topic: &str, draft: NewEntry) -> Result<EntryId, DomainError> {
        validate_topic(topic)?;
        let mut state = self.lock();
        let entry = state.append(topic, draft);
        state.deliver(&entry);
        Ok(entry.id)
    }

    /// Append several entries under one lock acquisition.
    ///
    /// Either all drafts land, contiguously and in order, or none do.
    pub fn post_batch(
        &self,
        topic: &str,
        drafts: Vec<NewEntry>,
    ) -> Result<Vec<EntryId>, DomainError> {
        validate_topic(topic)?;
        let mut state = self.lock();
        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let entry = state.append(topic, draft);
            state.deliver(&entry);
            ids.push(entry.id);
        }
        Ok(ids)
    }

    /// Entries matching every filter, newest first, truncated to `filter.limit`
    pub fn read(&self, filter: &EntryFilter) -> Vec<Entry> {
        let state = self.lock();
        match &filter.topic {
            Some(topic) => state
                .topics
                .get(topic)
                .map(|entries| {
                    entries
                        .iter()
                        .rev()
                        .filter(|e| filter.matches(e))
                        .take(filter.limit)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            None => {
                let mut matching: Vec<Entry> = state
                    .topics
                    .values()
                    .flatten()
                    .filter(|e| filter.matches(e))
                    .cloned()
                    .collect();
                // ids are assigned in post order across all topics
                matching.sort_by(|a, b| b.id.cmp(&a.id));
                matching.truncate(filter.limit);
                matching
            }
        }
    }

    /// Case-insensitive relevance search; zero-scoring entries are excluded.
    ///
    /// Results are ordered by relevance, newest first among equals.
    pub fn search(&self, topic: Option<&str>, query: &str) -> Vec<Entry> {
        let state = self.lock();
        let candidates: Box<dyn Iterator<Item = &Entry>> = match topic {
            Some(topic) => Box::new(state.topics.get(topic).into_iter().flatten()),
            None => Box::new(state.topics.values().flatten()),
        };

        let mut scored: Vec<(Relevance, &Entry)> = candidates
            .map(|e| (Relevance::score(query, &e.content), e))
            .filter(|(relevance, _)| relevance.is_match())
            .collect();
        scored.sort_by(|(ra, a), (rb, b)| rb.cmp(ra).then_with(|| b.id.cmp(&a.id)));
        scored.into_iter().map(|(_, e)| e.clone()).collect()
    }

    /// Every entry of a topic, oldest first
    pub fn consensus_trail(&self, topic: &str) -> Vec<Entry> {
        self.lock().topics.get(topic).cloned().unwrap_or_default()
    }

    /// Look an entry up by id
    pub fn get(&self, id: EntryId) -> Option<Entry> {
        let state = self.lock();
        let topic = state.index.get(&id)?;
        state
            .topics
            .get(topic)?
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// Names of all topics with at least one entry
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.lock().topics.keys().cloned().collect();
        topics.sort();
        topics
    }

    /// Statistics for one topic, or for the whole log
    pub fn statistics(&self, topic: Option<&str>) -> TopicStatistics {
        let state = self.lock();
        match topic {
            Some(topic) => TopicStatistics::from_entries(state.topics.get(topic).into_iter().flatten()),
            None => TopicStatistics::from_entries(state.topics.values().flatten()),
        }
    }

    /// Atomically remove every entry of a topic. Returns how many were removed.
    pub fn clear_topic(&self, topic: &str) -> usize {
        let mut state = self.lock();
        let Some(entries) = state.topics.remove(topic) else {
            return 0;
        };
        for entry in &entries {
            state.index.remove(&entry.id);
        }
        debug!("Cleared {} entries from topic '{}'", entries.len(), topic);
        entries.len()
    }

    /// Receive every entry posted to `topic` from now on
    pub fn subscribe(&self, topic: &str) -> Result<Subscription, DomainError> {
        validate_topic(topic)?;
        let (sender, receiver) = mpsc::channel(self.subscriber_capacity);
        let mut state = self.lock();
        state.prune_subscribers();
        state.next_subscription += 1;
        let id = SubscriptionId(state.next_subscription);
        state
            .subscribers
            .entry(topic.to_string())
            .or_default()
            .push(Subscriber { id, sender });

        Ok(Subscription {
            id,
            topic: topic.to_string(),
            receiver,
        })
    }

    /// Stop deliveries to a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut state = self.lock();
        let Some(subscribers) = state.subscribers.get_mut(&subscription.topic) else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|s| s.id != subscription.id);
        let removed = before != subscribers.len();
        if subscribers.is_empty() {
            state.subscribers.remove(&subscription.topic);
        }
        removed
    }
}

fn validate_topic(topic: &str) -> Result<(), DomainError> {
    if topic.trim().is_empty() {
        Err(DomainError::InvalidTopic(topic.to_string()))
    } else {
        Ok(())
    }
}
