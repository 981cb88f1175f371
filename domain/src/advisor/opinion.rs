//! Advisor opinions
//!
//! An [`Opinion`] is one advisor's structured answer for one round. Opinions
//! are not persisted directly; the advisor protocol turns them into
//! knowledge-log entries and the aggregator reduces them to a decision.

use crate::knowledge::clamp_unit;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Urgency of an opinion or decision.
///
/// Totally ordered: `Critical > High > Medium > Low > Informational`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Informational,
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Informational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Informational => "informational",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One advisor's output for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    pub advisor_id: String,
    pub advisor_name: String,
    pub recommendation: String,
    pub rationale: String,
    /// Always within [0, 1]; the constructors clamp
    pub confidence: f64,
    pub priority: Priority,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub supporting_data: Map<String, Value>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Opinion {
    pub fn new(
        advisor_id: impl Into<String>,
        advisor_name: impl Into<String>,
        recommendation: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            advisor_id: advisor_id.into(),
            advisor_name: advisor_name.into(),
            recommendation: recommendation.into(),
            rationale: String::new(),
            confidence: clamp_unit(confidence),
            priority: Priority::default(),
            concerns: Vec::new(),
            opportunities: Vec::new(),
            supporting_data: Map::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_concern(mut self, concern: impl Into<String>) -> Self {
        self.concerns.push(concern.into());
        self
    }

    pub fn with_opportunity(mut self, opportunity: impl Into<String>) -> Self {
        self.opportunities.push(opportunity.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.supporting_data.insert(key.into(), value.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Re-clamp the confidence. Opinions built by hand (struct literal or
    /// deserialisation) pass through here before aggregation.
    pub fn clamped(mut self) -> Self {
        self.confidence = clamp_unit(self.confidence);
        self
    }
}
