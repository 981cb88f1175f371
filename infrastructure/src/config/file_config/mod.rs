//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod advisors;
mod archive;
mod council;
mod logging;
mod output;
mod repl;
mod weighting;

pub use advisors::{FileAdvisorsConfig, FileCustomAdvisor};
pub use archive::FileArchiveConfig;
pub use council::FileCouncilConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;
pub use weighting::FileWeightingConfig;

use council_application::{AdvisorProtocol, CouncilConfig};
use council_domain::{AggregationTuning, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round settings
    pub council: FileCouncilConfig,
    /// Aggregator tuning constants
    pub aggregation: AggregationTuning,
    /// Advisor weight bonuses
    pub weighting: FileWeightingConfig,
    /// Built-in and custom advisors
    pub advisors: FileAdvisorsConfig,
    /// Decision archive
    pub archive: FileArchiveConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Enum parse failures (selection, method)
    /// 2. Numeric ranges (deadline, thresholds, tuning)
    /// 3. Advisor declarations (unknown built-ins, empty expertise, duplicates)
    /// 4. Core advisor ids that match no declared advisor
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Enum parse validation
        issues.extend(self.council.parse_selection().1);
        issues.extend(self.council.parse_method().1);

        // 2. Range validation
        issues.extend(self.council.parse_deadline().1);
        issues.extend(self.council.check_ranges());
        issues.extend(self.weighting.to_weight_tuning().1);
        if let Err(reason) = self.aggregation.validate() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "aggregation".to_string(),
                },
                format!("aggregation: {}", reason),
            ));
        }

        // 3. Advisor declarations
        let (specs, advisor_issues) = self.advisors.to_specs();
        issues.extend(advisor_issues);

        // 4. Core advisors must exist
        for core in &self.council.core_advisors {
            if !specs.iter().any(|s| s.id() == core) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownCoreAdvisor {
                        advisor: core.clone(),
                    },
                    format!(
                        "council.core_advisors: '{}' matches no configured advisor",
                        core
                    ),
                ));
            }
        }

        issues
    }

    /// Convert into the application configuration.
    ///
    /// Invalid values fall back to their defaults; call [`validate`](Self::validate)
    /// first to report them.
    pub fn to_council_config(&self) -> CouncilConfig {
        let council = &self.council;
        CouncilConfig {
            advisors: self.advisors.to_specs().0,
            initialize_core_only: council.initialize_core_only,
            selection: council.parse_selection().0,
            core_advisors: council.core_advisors.clone(),
            history_capacity: council.history_capacity,
            default_method: council.parse_method().0,
            default_deadline: council.parse_deadline().0,
            recall_limit: council.recall_limit,
            protocol: AdvisorProtocol {
                recommendation_threshold: council.recommendation_threshold,
                reflection_threshold: council.reflection_threshold,
                related_entries_limit: council.related_entries_limit,
            },
            aggregation: self.aggregation.clone(),
            weighting: self.weighting.to_weight_tuning().0,
        }
    }
}
