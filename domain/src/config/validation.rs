//! Configuration validation issues.
//!
//! Config loaders report problems as a list of [`ConfigIssue`]s rather than
//! failing on the first one, so every problem can be shown at start-up.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field does not name a known variant.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field is outside its allowed range.
    OutOfRange { field: String },
    /// A custom advisor declares no expertise tags.
    EmptyExpertise { advisor: String },
    /// Two advisors share the same id.
    DuplicateAdvisor { advisor: String },
    /// A core advisor id does not match any known advisor.
    UnknownCoreAdvisor { advisor: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let err = ConfigIssue::error(
            ConfigIssueCode::OutOfRange {
                field: "council.history_capacity".to_string(),
            },
            "must be positive",
        );
        assert!(err.is_error());

        let warn = ConfigIssue::warning(
            ConfigIssueCode::EmptyExpertise {
                advisor: "legal".to_string(),
            },
            "no expertise",
        );
        assert_eq!(warn.severity, Severity::Warning);
        assert!(!warn.is_error());
    }
}
