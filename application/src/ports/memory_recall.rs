//! Memory recall port
//!
//! Before a round, the coordinator asks the recall port for facts an advisor
//! has seen in earlier rounds. Recall is optional; a failure only means the
//! advisor runs without enrichment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Context key under which recalled facts are handed to advisors
pub const RECALLED_FACTS_KEY: &str = "recalled_facts";

#[derive(Error, Debug)]
pub enum RecallError {
    #[error("Recall backend unavailable: {0}")]
    Unavailable(String),

    #[error("Recall failed: {0}")]
    Failed(String),
}

/// A fact remembered from an earlier round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberedFact {
    /// Where the fact came from, e.g. the topic of the earlier round
    pub source: String,
    pub content: String,
    /// How closely the fact matches the current question, in [0, 1]
    pub relevance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl RememberedFact {
    pub fn new(source: impl Into<String>, content: impl Into<String>, relevance: f64) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            relevance: relevance.clamp(0.0, 1.0),
            recorded_at: None,
        }
    }

    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(at);
        self
    }
}

/// Long-term memory consulted before each round
#[async_trait]
pub trait MemoryRecall: Send + Sync {
    /// Up to `limit` facts relevant to `question`, most relevant first
    async fn recall(
        &self,
        advisor_id: &str,
        question: &str,
        context: &Map<String, Value>,
        limit: usize,
    ) -> Result<Vec<RememberedFact>, RecallError>;
}

/// Recall that never remembers anything
pub struct NoRecall;

#[async_trait]
impl MemoryRecall for NoRecall {
    async fn recall(
        &self,
        _advisor_id: &str,
        _question: &str,
        _context: &Map<String, Value>,
        _limit: usize,
    ) -> Result<Vec<RememberedFact>, RecallError> {
        Ok(Vec::new())
    }
}

/// Copy of `context` with the recalled facts attached under [`RECALLED_FACTS_KEY`]
pub fn enrich_context(context: &Map<String, Value>, facts: &[RememberedFact]) -> Map<String, Value> {
    let mut enriched = context.clone();
    if !facts.is_empty() {
        let values = facts
            .iter()
            .filter_map(|f| serde_json::to_value(f).ok())
            .collect();
        enriched.insert(RECALLED_FACTS_KEY.to_string(), Value::Array(values));
    }
    enriched
}
