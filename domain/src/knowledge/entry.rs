//! Knowledge log entries
//!
//! An [`Entry`] is an immutable fact on the knowledge log. Entries are
//! created from a [`NewEntry`] draft; the log assigns the id and timestamp
//! at append time and owns the entry from then on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Identifier of an entry, assigned by the knowledge log.
///
/// References between entries are stored as plain ids; the log is the sole
/// lookup authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

/// What an entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Insight,
    Recommendation,
    Concern,
    Question,
    Data,
    Vote,
    Consensus,
}

impl EntryKind {
    pub const ALL: [EntryKind; 7] = [
        EntryKind::Insight,
        EntryKind::Recommendation,
        EntryKind::Concern,
        EntryKind::Question,
        EntryKind::Data,
        EntryKind::Vote,
        EntryKind::Consensus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Insight => "insight",
            EntryKind::Recommendation => "recommendation",
            EntryKind::Concern => "concern",
            EntryKind::Question => "question",
            EntryKind::Data => "data",
            EntryKind::Vote => "vote",
            EntryKind::Consensus => "consensus",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        EntryKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lowered)
            .ok_or_else(|| format!("Unknown entry kind: {}", s))
    }
}

/// Draft of an entry before it is appended to the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub author: String,
    pub kind: EntryKind,
    pub content: String,
    pub confidence: f64,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub references: Vec<EntryId>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl NewEntry {
    /// Create a draft with full confidence and no metadata
    pub fn new(author: impl Into<String>, kind: EntryKind, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            kind,
            content: content.into(),
            confidence: 1.0,
            metadata: Map::new(),
            references: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Set the confidence, clamped to [0, 1]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_unit(confidence);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_reference(mut self, id: EntryId) -> Self {
        self.references.push(id);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// An immutable fact on the knowledge log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub topic: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub kind: EntryKind,
    pub content: String,
    pub confidence: f64,
    pub metadata: Map<String, Value>,
    pub references: Vec<EntryId>,
    pub tags: BTreeSet<String>,
}

impl Entry {
    /// Materialise a draft. Only the knowledge log calls this.
    pub fn from_draft(
        id: EntryId,
        topic: impl Into<String>,
        created_at: DateTime<Utc>,
        draft: NewEntry,
    ) -> Self {
        Self {
            id,
            topic: topic.into(),
            author: draft.author,
            created_at,
            kind: draft.kind,
            content: draft.content,
            confidence: clamp_unit(draft.confidence),
            metadata: draft.metadata,
            references: draft.references,
            tags: draft.tags,
        }
    }

    /// The draft this entry was created from
    pub fn to_draft(&self) -> NewEntry {
        NewEntry {
            author: self.author.clone(),
            kind: self.kind,
            content: self.content.clone(),
            confidence: self.confidence,
            metadata: self.metadata.clone(),
            references: self.references.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Clamp a score to [0, 1]; NaN becomes 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_roundtrip_names() {
        for kind in EntryKind::ALL {
            assert_eq!(kind.as_str().parse::<EntryKind>().unwrap(), kind);
        }
        assert_eq!(" Concern ".parse::<EntryKind>().unwrap(), EntryKind::Concern);
        assert!("opinion".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_new_entry_clamps_confidence() {
        let draft = NewEntry::new("risk", EntryKind::Insight, "x").with_confidence(1.7);
        assert_eq!(draft.confidence, 1.0);
        let draft = NewEntry::new("risk", EntryKind::Insight, "x").with_confidence(f64::NAN);
        assert_eq!(draft.confidence, 0.0);
    }

    #[test]
    fn test_from_draft_preserves_fields() {
        let draft = NewEntry::new("engineer", EntryKind::Recommendation, "Ship it")
            .with_confidence(0.8)
            .with_metadata("priority", "high")
            .with_reference(EntryId(3))
            .with_tags(["deploy", "release"]);
        let entry = Entry::from_draft(EntryId(7), "launch", Utc::now(), draft.clone());

        assert_eq!(entry.id, EntryId(7));
        assert_eq!(entry.topic, "launch");
        assert_eq!(entry.to_draft(), draft);
        assert_eq!(entry.id.to_string(), "entry-7");
    }
}
