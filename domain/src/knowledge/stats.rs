//! Aggregate statistics over knowledge log entries

use super::entry::{Entry, EntryKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Summary of a topic (or of the whole log)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicStatistics {
    pub count: usize,
    pub distinct_authors: usize,
    pub kind_histogram: BTreeMap<EntryKind, usize>,
    /// Mean confidence across entries, 0.0 when there are none
    pub mean_confidence: f64,
    pub first_at: Option<DateTime<Utc>>,
    pub last_at: Option<DateTime<Utc>>,
}

impl TopicStatistics {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let mut stats = TopicStatistics::default();
        let mut authors = BTreeSet::new();
        let mut confidence_sum = 0.0;

        for entry in entries {
            stats.count += 1;
            authors.insert(entry.author.as_str());
            *stats.kind_histogram.entry(entry.kind).or_insert(0) += 1;
            confidence_sum += entry.confidence;

            stats.first_at = Some(match stats.first_at {
                Some(first) => first.min(entry.created_at),
                None => entry.created_at,
            });
            stats.last_at = Some(match stats.last_at {
                Some(last) => last.max(entry.created_at),
                None => entry.created_at,
            });
        }

        stats.distinct_authors = authors.len();
        if stats.count > 0 {
            stats.mean_confidence = confidence_sum / stats.count as f64;
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn kind_count(&self, kind: EntryKind) -> usize {
        self.kind_histogram.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::entry::{EntryId, NewEntry};
    use chrono::Duration;

    #[test]
    fn test_empty_statistics() {
        let stats = TopicStatistics::from_entries(std::iter::empty());
        assert!(stats.is_empty());
        assert_eq!(stats.mean_confidence, 0.0);
        assert!(stats.first_at.is_none());
    }

    #[test]
    fn test_statistics_over_entries() {
        let t0 = Utc::now();
        let entries = vec![
            Entry::from_draft(
                EntryId(1),
                "t",
                t0,
                NewEntry::new("risk", EntryKind::Concern, "a").with_confidence(0.4),
            ),
            Entry::from_draft(
                EntryId(2),
                "t",
                t0 + Duration::seconds(2),
                NewEntry::new("risk", EntryKind::Insight, "b").with_confidence(0.8),
            ),
            Entry::from_draft(
                EntryId(3),
                "t",
                t0 + Duration::seconds(1),
                NewEntry::new("finance", EntryKind::Concern, "c").with_confidence(0.6),
            ),
        ];

        let stats = TopicStatistics::from_entries(&entries);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.distinct_authors, 2);
        assert_eq!(stats.kind_count(EntryKind::Concern), 2);
        assert_eq!(stats.kind_count(EntryKind::Vote), 0);
        assert!((stats.mean_confidence - 0.6).abs() < 1e-9);
        assert_eq!(stats.first_at, Some(t0));
        assert_eq!(stats.last_at, Some(t0 + Duration::seconds(2)));
    }
}
