//! Aggregation tuning constants
//!
//! The band thresholds and factors below are product-tuning values with no
//! derivation behind them. They are kept configurable; tests pin the defaults
//! as-is without claiming they are optimal.

use serde::{Deserialize, Serialize};

/// Tunable constants for the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationTuning {
    /// Agreement at or above this keeps the winners' full mean confidence
    pub full_confidence_agreement: f64,
    /// Agreement at or above this scales confidence by `reduced_factor`
    pub reduced_confidence_agreement: f64,
    /// Agreement at or above this scales confidence by `low_factor`
    pub low_confidence_agreement: f64,
    pub reduced_factor: f64,
    pub low_factor: f64,
    /// Applied when agreement is below every band
    pub floor_factor: f64,
    /// Fraction of responders a recommendation needs to win a supermajority
    pub supermajority_fraction: f64,
    /// Supermajority confidence is `agreement × supermajority_confidence_factor`
    pub supermajority_confidence_factor: f64,
    pub unanimous_confidence: f64,
    /// Agreement above which a High-majority decision keeps High priority
    pub high_priority_agreement: f64,
    /// Agreement below which a decision drops to Low priority
    pub low_priority_agreement: f64,
}

impl Default for AggregationTuning {
    fn default() -> Self {
        Self {
            full_confidence_agreement: 0.6,
            reduced_confidence_agreement: 0.4,
            low_confidence_agreement: 0.2,
            reduced_factor: 0.85,
            low_factor: 0.7,
            floor_factor: 0.5,
            supermajority_fraction: 0.66,
            supermajority_confidence_factor: 0.85,
            unanimous_confidence: 0.95,
            high_priority_agreement: 0.7,
            low_priority_agreement: 0.5,
        }
    }
}

impl AggregationTuning {
    /// Confidence multiplier for a given agreement level
    pub fn confidence_factor(&self, agreement: f64) -> f64 {
        if agreement >= self.full_confidence_agreement {
            1.0
        } else if agreement >= self.reduced_confidence_agreement {
            self.reduced_factor
        } else if agreement >= self.low_confidence_agreement {
            self.low_factor
        } else {
            self.floor_factor
        }
    }

    /// Minimum member count for a supermajority among `responders` advisors
    pub fn supermajority_threshold(&self, responders: usize) -> usize {
        // epsilon keeps exact products such as 0.66 × 50 from rounding up
        (self.supermajority_fraction * responders as f64 - 1e-9).ceil() as usize
    }

    /// Check that every value is a probability and bands are descending
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("full_confidence_agreement", self.full_confidence_agreement),
            ("reduced_confidence_agreement", self.reduced_confidence_agreement),
            ("low_confidence_agreement", self.low_confidence_agreement),
            ("reduced_factor", self.reduced_factor),
            ("low_factor", self.low_factor),
            ("floor_factor", self.floor_factor),
            ("supermajority_fraction", self.supermajority_fraction),
            (
                "supermajority_confidence_factor",
                self.supermajority_confidence_factor,
            ),
            ("unanimous_confidence", self.unanimous_confidence),
            ("high_priority_agreement", self.high_priority_agreement),
            ("low_priority_agreement", self.low_priority_agreement),
        ];
        for (name, value) in values {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", name, value));
            }
        }
        if !(self.full_confidence_agreement >= self.reduced_confidence_agreement
            && self.reduced_confidence_agreement >= self.low_confidence_agreement)
        {
            return Err("confidence bands must be in descending order".to_string());
        }
        Ok(())
    }
}
