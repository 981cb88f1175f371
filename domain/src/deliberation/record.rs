//! Deliberation records
//!
//! One [`DeliberationRecord`] is produced per completed round and kept in the
//! coordinator's bounded history.

use crate::advisor::Opinion;
use crate::aggregation::Decision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// Bookkeeping for one round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliberationStats {
    /// Advisors chosen to take part
    pub selected: Vec<String>,
    /// Advisors whose opinion reached the aggregator
    pub responded: Vec<String>,
    /// Advisors whose analysis failed
    pub failed: Vec<String>,
    /// Advisors still running when the deadline expired
    pub timed_out: Vec<String>,
    /// Weight applied to each responder
    pub weights: BTreeMap<String, f64>,
    /// Facts injected into the context by memory recall
    pub recalled_facts: usize,
}

impl DeliberationStats {
    /// Fraction of selected advisors that responded
    pub fn response_rate(&self) -> f64 {
        if self.selected.is_empty() {
            0.0
        } else {
            self.responded.len() as f64 / self.selected.len() as f64
        }
    }
}

/// A completed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationRecord {
    /// Knowledge log topic used for the round
    pub topic: String,
    pub question: String,
    pub context: Map<String, Value>,
    pub decision: Decision,
    pub opinions: Vec<Opinion>,
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
    pub stats: DeliberationStats,
}

impl DeliberationRecord {
    /// Opinion given by a specific advisor in this round
    pub fn opinion_of(&self, advisor_id: &str) -> Option<&Opinion> {
        self.opinions.iter().find(|o| o.advisor_id == advisor_id)
    }
}
