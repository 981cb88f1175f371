//! Weighting configuration from TOML (`[weighting]` section)

use council_application::WeightTuning;
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw weighting configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWeightingConfig {
    pub rich_data_threshold: usize,
    pub rich_data_bonus: f64,
    pub high_confidence_threshold: f64,
    pub high_confidence_bonus: f64,
}

impl Default for FileWeightingConfig {
    fn default() -> Self {
        let tuning = WeightTuning::default();
        Self {
            rich_data_threshold: tuning.rich_data_threshold,
            rich_data_bonus: tuning.rich_data_bonus,
            high_confidence_threshold: tuning.high_confidence_threshold,
            high_confidence_bonus: tuning.high_confidence_bonus,
        }
    }
}

impl FileWeightingConfig {
    pub fn to_weight_tuning(&self) -> (WeightTuning, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        for (field, value) in [
            ("weighting.rich_data_bonus", self.rich_data_bonus),
            ("weighting.high_confidence_threshold", self.high_confidence_threshold),
            ("weighting.high_confidence_bonus", self.high_confidence_bonus),
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

        let tuning = WeightTuning {
            rich_data_threshold: self.rich_data_threshold,
            rich_data_bonus: self.rich_data_bonus,
            high_confidence_threshold: self.high_confidence_threshold,
            high_confidence_bonus: self.high_confidence_bonus,
        };
        (tuning, issues)
    }
}
