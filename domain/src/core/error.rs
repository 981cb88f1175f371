//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid topic name: {0:?}")]
    InvalidTopic(String),

    #[error("Aggregator called with no opinions")]
    NoOpinions,

    #[error("Total advisor weight is zero; agreement is undefined")]
    ZeroTotalWeight,

    #[error("Unknown aggregation method: {0}")]
    UnknownMethod(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}

impl DomainError {
    /// Whether the error is caused by the caller handing the aggregator nothing to reduce
    pub fn is_empty_input(&self) -> bool {
        matches!(self, DomainError::NoOpinions | DomainError::ZeroTotalWeight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_topic_display() {
        let error = DomainError::InvalidTopic("  ".to_string());
        assert_eq!(error.to_string(), "Invalid topic name: \"  \"");
    }

    #[test]
    fn test_is_empty_input() {
        assert!(DomainError::NoOpinions.is_empty_input());
        assert!(DomainError::ZeroTotalWeight.is_empty_input());
        assert!(!DomainError::InvalidTopic(String::new()).is_empty_input());
        assert!(!DomainError::UnknownMethod("x".to_string()).is_empty_input());
    }
}
