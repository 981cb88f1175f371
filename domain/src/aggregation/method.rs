//! Aggregation methods
//!
//! Selects which reduction algorithm turns a set of opinions into a decision.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Reduction algorithm used by the [`Aggregator`](super::Aggregator)
///
/// - `WeightedMajority`: Σ(weight × confidence) per recommendation, highest wins
/// - `Supermajority`: a recommendation needs at least 66% of responders
/// - `Unanimous`: every advisor must recommend the same thing
/// - `ConfidenceWeighted`: weighted majority where each weight is the advisor's own confidence
/// - `Hybrid` (default): unanimous, then supermajority, then blended weighted majority
///
/// # Example
///
/// ```
/// use council_domain::aggregation::AggregationMethod;
///
/// let method: AggregationMethod = "supermajority".parse().unwrap();
/// assert_eq!(method, AggregationMethod::Supermajority);
/// assert_eq!(AggregationMethod::default(), AggregationMethod::Hybrid);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    WeightedMajority,
    Supermajority,
    Unanimous,
    ConfidenceWeighted,
    #[default]
    Hybrid,
}

impl AggregationMethod {
    pub const ALL: [AggregationMethod; 5] = [
        AggregationMethod::WeightedMajority,
        AggregationMethod::Supermajority,
        AggregationMethod::Unanimous,
        AggregationMethod::ConfidenceWeighted,
        AggregationMethod::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMethod::WeightedMajority => "weighted_majority",
            AggregationMethod::Supermajority => "supermajority",
            AggregationMethod::Unanimous => "unanimous",
            AggregationMethod::ConfidenceWeighted => "confidence_weighted",
            AggregationMethod::Hybrid => "hybrid",
        }
    }

    /// Get a human-readable description of this method
    pub fn description(&self) -> &'static str {
        match self {
            AggregationMethod::WeightedMajority => "weighted majority (weight × confidence)",
            AggregationMethod::Supermajority => "supermajority (at least two thirds of advisors)",
            AggregationMethod::Unanimous => "unanimous (all advisors agree)",
            AggregationMethod::ConfidenceWeighted => "confidence-weighted majority",
            AggregationMethod::Hybrid => "hybrid (unanimous, then supermajority, then weighted)",
        }
    }
}

impl std::fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AggregationMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weighted_majority" | "weighted" | "majority" => Ok(AggregationMethod::WeightedMajority),
            "supermajority" | "super_majority" => Ok(AggregationMethod::Supermajority),
            "unanimous" | "unanimity" => Ok(AggregationMethod::Unanimous),
            "confidence_weighted" | "confidence" => Ok(AggregationMethod::ConfidenceWeighted),
            "hybrid" => Ok(AggregationMethod::Hybrid),
            _ => Err(DomainError::UnknownMethod(s.to_string())),
        }
    }
}
