//! Advisor configuration from TOML (`[advisors]` section)

use council_application::{AdvisorSpec, KeywordAdvisorSpec};
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw advisor configuration from TOML
///
/// # Example
///
/// ```toml
/// [advisors]
/// builtin = ["strategist", "risk", "engineer", "finance"]
///
/// [[advisors.custom]]
/// id = "legal"
/// name = "Legal Counsel"
/// expertise = ["contract", "license", "gdpr"]
/// recommendation = "Get a legal review before committing"
/// concerns = ["Licence terms unclear"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdvisorsConfig {
    /// Built-in advisors to enable; all of them when absent
    pub builtin: Option<Vec<String>>,
    pub custom: Vec<FileCustomAdvisor>,
}

/// A keyword advisor defined in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCustomAdvisor {
    pub id: String,
    pub name: String,
    pub expertise: Vec<String>,
    pub recommendation: String,
    pub concerns: Vec<String>,
    pub confidence: f64,
}

impl Default for FileCustomAdvisor {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            expertise: Vec::new(),
            recommendation: String::new(),
            concerns: Vec::new(),
            confidence: 0.6,
        }
    }
}

impl FileCustomAdvisor {
    fn to_spec(&self) -> KeywordAdvisorSpec {
        KeywordAdvisorSpec {
            id: self.id.clone(),
            name: self.name.clone(),
            expertise: self.expertise.clone(),
            recommendation: self.recommendation.clone(),
            concerns: self.concerns.clone(),
            confidence: self.confidence,
        }
    }
}

impl FileAdvisorsConfig {
    /// Advisor specs in declaration order, with the issues found on the way.
    ///
    /// Custom advisors with no expertise are still returned; they fail at
    /// construction and are left out of the registry with a warning.
    pub fn to_specs(&self) -> (Vec<AdvisorSpec>, Vec<ConfigIssue>) {
        let mut specs = Vec::new();
        let mut issues = Vec::new();

        match &self.builtin {
            None => specs.extend(AdvisorSpec::builtin()),
            Some(ids) => {
                for id in ids {
                    match AdvisorSpec::builtin_by_id(id) {
                        Some(spec) => specs.push(spec),
                        None => issues.push(ConfigIssue::warning(
                            ConfigIssueCode::InvalidEnumValue {
                                field: "advisors.builtin".to_string(),
                                value: id.clone(),
                                valid_values: AdvisorSpec::builtin()
                                    .iter()
                                    .map(|s| s.id().to_string())
                                    .collect(),
                            },
                            format!("advisors.builtin: unknown advisor '{}', ignoring", id),
                        )),
                    }
                }
            }
        }

        for custom in &self.custom {
            if custom.expertise.iter().all(|e| e.trim().is_empty()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyExpertise {
                        advisor: custom.id.clone(),
                    },
                    format!(
                        "advisors.custom '{}' has no expertise tags and will be skipped",
                        custom.id
                    ),
                ));
            }
            specs.push(AdvisorSpec::Keyword(custom.to_spec()));
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.id().to_string()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateAdvisor {
                        advisor: spec.id().to_string(),
                    },
                    format!("advisor id '{}' is declared more than once", spec.id()),
                ));
            }
        }

        (specs, issues)
    }
}
