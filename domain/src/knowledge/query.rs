//! Read filters for the knowledge log

use super::entry::{Entry, EntryKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default maximum number of entries returned by a read
pub const DEFAULT_READ_LIMIT: usize = 100;

/// Conjunctive filter applied by `KnowledgeLog::read`.
///
/// Every `Some` field must match. `topic: None` searches all topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFilter {
    pub topic: Option<String>,
    pub author: Option<String>,
    pub kind: Option<EntryKind>,
    pub since: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            topic: None,
            author: None,
            kind: None,
            since: None,
            limit: DEFAULT_READ_LIMIT,
        }
    }
}

impl EntryFilter {
    /// Filter on a single topic
    pub fn topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Self::default()
        }
    }

    /// Filter across every topic
    pub fn all_topics() -> Self {
        Self::default()
    }

    pub fn by_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn of_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether an entry passes the author, kind and timestamp filters.
    ///
    /// The topic is matched by the log when it picks partitions.
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(author) = &self.author {
            if &entry.author != author {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(since) = self.since {
            if entry.created_at < since {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::entry::{EntryId, NewEntry};
    use chrono::Duration;

    fn entry(author: &str, kind: EntryKind, at: DateTime<Utc>) -> Entry {
        Entry::from_draft(EntryId(1), "t", at, NewEntry::new(author, kind, "content"))
    }

    #[test]
    fn test_default_matches_everything() {
        let e = entry("risk", EntryKind::Concern, Utc::now());
        assert!(EntryFilter::default().matches(&e));
        assert_eq!(EntryFilter::default().limit, DEFAULT_READ_LIMIT);
    }

    #[test]
    fn test_author_and_kind_are_conjunctive() {
        let e = entry("risk", EntryKind::Concern, Utc::now());
        assert!(EntryFilter::topic("t").by_author("risk").matches(&e));
        assert!(!EntryFilter::topic("t").by_author("finance").matches(&e));
        assert!(
            !EntryFilter::topic("t")
                .by_author("risk")
                .of_kind(EntryKind::Insight)
                .matches(&e)
        );
    }

    #[test]
    fn test_since_excludes_older_entries() {
        let now = Utc::now();
        let old = entry("risk", EntryKind::Data, now - Duration::seconds(10));
        let filter = EntryFilter::all_topics().since(now - Duration::seconds(5));
        assert!(!filter.matches(&old));
        assert!(filter.matches(&entry("risk", EntryKind::Data, now)));
    }
}
