//! Council configuration from TOML (`[council]` section)

use council_domain::{AggregationMethod, ConfigIssue, ConfigIssueCode, SelectionMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw council configuration from TOML
///
/// # Example
///
/// ```toml
/// [council]
/// selection = "core"            # "core" or "full"
/// core_advisors = ["strategist", "risk", "engineer"]
/// method = "hybrid"             # weighted_majority, supermajority, unanimous,
///                               # confidence_weighted, hybrid
/// deadline_secs = 30
/// history_capacity = 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    pub selection: String,
    pub core_advisors: Vec<String>,
    /// Construct only the core advisors at start-up
    pub initialize_core_only: bool,
    pub method: String,
    pub deadline_secs: f64,
    pub history_capacity: usize,
    pub related_entries_limit: usize,
    pub recall_limit: usize,
    pub recommendation_threshold: f64,
    pub reflection_threshold: f64,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            selection: "core".to_string(),
            core_advisors: vec![
                "strategist".to_string(),
                "risk".to_string(),
                "engineer".to_string(),
            ],
            initialize_core_only: false,
            method: "hybrid".to_string(),
            deadline_secs: 30.0,
            history_capacity: 100,
            related_entries_limit: 20,
            recall_limit: 5,
            recommendation_threshold: 0.6,
            reflection_threshold: 0.7,
        }
    }
}

impl FileCouncilConfig {
    /// Parse the selection mode, falling back to core-only on failure
    pub fn parse_selection(&self) -> (SelectionMode, Vec<ConfigIssue>) {
        match self.selection.parse::<SelectionMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "council.selection".to_string(),
                        value: self.selection.clone(),
                        valid_values: vec!["core".to_string(), "full".to_string()],
                    },
                    format!(
                        "council.selection: unknown value '{}', falling back to 'core'",
                        self.selection
                    ),
                );
                (SelectionMode::default(), vec![issue])
            }
        }
    }

    /// Parse the aggregation method, falling back to hybrid on failure
    pub fn parse_method(&self) -> (AggregationMethod, Vec<ConfigIssue>) {
        match self.method.parse::<AggregationMethod>() {
            Ok(method) => (method, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "council.method".to_string(),
                        value: self.method.clone(),
                        valid_values: AggregationMethod::ALL
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    },
                    format!(
                        "council.method: unknown value '{}', falling back to 'hybrid'",
                        self.method
                    ),
                );
                (AggregationMethod::default(), vec![issue])
            }
        }
    }

    /// The round deadline; non-positive or non-finite values are errors
    pub fn parse_deadline(&self) -> (Duration, Vec<ConfigIssue>) {
        if self.deadline_secs.is_finite() && self.deadline_secs > 0.0 {
            (Duration::from_secs_f64(self.deadline_secs), vec![])
        } else {
            let issue = ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "council.deadline_secs".to_string(),
                },
                format!(
                    "council.deadline_secs must be a positive number of seconds, got {}",
                    self.deadline_secs
                ),
            );
            (Duration::from_secs(30), vec![issue])
        }
    }

    /// Range checks that have no parse step
    pub fn check_ranges(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("council.recommendation_threshold", self.recommendation_threshold),
            ("council.reflection_threshold", self.reflection_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: field.to_string(),
                    },
                    format!("{} must be within [0, 1], got {}", field, value),
                ));
            }
        }
        if self.history_capacity == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "council.history_capacity".to_string(),
                },
                "council.history_capacity is 0; no rounds will be kept in memory",
            ));
        }
        issues
    }
}
