//! Coordinator inputs, outputs and errors

use council_domain::{AggregationMethod, DomainError};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that end a round without a decision
#[derive(Error, Debug)]
pub enum DeliberateError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid topic name: {0:?}")]
    InvalidTopic(String),

    #[error("No advisors available for this question")]
    NoAdvisors,

    #[error("Deadline of {deadline:?} expired before any of {n} advisors responded", n = .selected.len())]
    RoundTimeout {
        deadline: Duration,
        selected: Vec<String>,
    },

    #[error("No advisor produced an opinion ({n} selected, {f} failed)", n = .selected.len(), f = .failed.len())]
    NoResponders {
        selected: Vec<String>,
        failed: Vec<String>,
    },

    #[error("Aggregation failed: {0}")]
    Aggregation(DomainError),
}

impl From<DomainError> for DeliberateError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidTopic(topic) => DeliberateError::InvalidTopic(topic),
            DomainError::InvalidQuestion(reason) => DeliberateError::InvalidQuestion(reason),
            other => DeliberateError::Aggregation(other),
        }
    }
}

/// Input for one deliberation round
#[derive(Debug, Clone, Default)]
pub struct DeliberateInput {
    pub question: String,
    pub context: Map<String, Value>,
    /// Knowledge log topic; generated when absent
    pub topic: Option<String>,
    /// Restrict the round to these advisors
    pub required_advisors: Option<Vec<String>>,
    pub method: Option<AggregationMethod>,
    pub deadline: Option<Duration>,
}

impl DeliberateInput {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_advisors<I, S>(mut self, advisors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_advisors = Some(advisors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_method(mut self, method: AggregationMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Outcome of [`Coordinator::initialize`](super::Coordinator::initialize)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitReport {
    pub registered: Vec<String>,
    /// Advisors that could not be constructed, with the reason
    pub skipped: Vec<(String, String)>,
    /// The registry had already been built; nothing was done
    pub already_initialized: bool,
}

impl InitReport {
    /// Initialised, but with no advisor to consult
    pub fn is_degraded(&self) -> bool {
        self.registered.is_empty()
    }
}
