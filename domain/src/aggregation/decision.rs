//! Decision value object
//!
//! A [`Decision`] is the single reduced output of a round.

use super::method::AggregationMethod;
use crate::advisor::{Opinion, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated numbers over every opinion that went into a decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub opinion_count: usize,
    pub mean_confidence: f64,
    pub concern_count: usize,
    pub opportunity_count: usize,
    pub priority_histogram: BTreeMap<Priority, usize>,
}

impl DecisionSummary {
    pub fn from_opinions(opinions: &[Opinion]) -> Self {
        let mut summary = DecisionSummary {
            opinion_count: opinions.len(),
            ..Default::default()
        };
        for opinion in opinions {
            summary.mean_confidence += opinion.confidence;
            summary.concern_count += opinion.concerns.len();
            summary.opportunity_count += opinion.opportunities.len();
            *summary.priority_histogram.entry(opinion.priority).or_insert(0) += 1;
        }
        if !opinions.is_empty() {
            summary.mean_confidence /= opinions.len() as f64;
        }
        summary
    }
}

/// Result of reducing a round's opinions
///
/// Invariants upheld by the aggregator:
/// - `supporting` and `dissenting` partition the input advisors exactly
/// - `confidence` and `agreement` lie in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Winning recommendation text
    pub recommendation: String,
    pub confidence: f64,
    /// Method the caller asked for
    pub method: AggregationMethod,
    /// Algorithm that actually settled the decision (differs from `method`
    /// after a fallback or a hybrid delegation)
    pub resolved_by: AggregationMethod,
    /// Fraction of total weight behind the winner
    pub agreement: f64,
    pub supporting: Vec<String>,
    pub dissenting: Vec<String>,
    /// Dissenting advisor id → their recommendation
    pub alternative_views: BTreeMap<String, String>,
    pub rationale: String,
    pub priority: Priority,
    pub summary: DecisionSummary,
}

impl Decision {
    pub fn is_unanimous(&self) -> bool {
        self.dissenting.is_empty()
    }

    pub fn participant_count(&self) -> usize {
        self.supporting.len() + self.dissenting.len()
    }

    /// Generate a visual support summary (e.g., "[●●○]")
    pub fn support_summary(&self) -> String {
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.supporting.len()));
        summary.extend(std::iter::repeat_n('○', self.dissenting.len()));
        summary.push(']');
        summary
    }
}

/// Label for an agreement band
pub fn agreement_label(agreement: f64) -> &'static str {
    if agreement >= 0.9 {
        "strong consensus"
    } else if agreement >= 0.66 {
        "clear majority"
    } else if agreement >= 0.5 {
        "moderate agreement with dissent"
    } else {
        "weak consensus"
    }
}

/// Short templated rationale keyed to the agreement band
pub fn rationale_for(
    recommendation: &str,
    agreement: f64,
    supporters: usize,
    participants: usize,
) -> String {
    let mut text = format!(
        "{}: {} of {} advisors back \"{}\" ({:.0}% of weight)",
        capitalize(agreement_label(agreement)),
        supporters,
        participants,
        recommendation,
        agreement * 100.0
    );
    let dissenters = participants.saturating_sub(supporters);
    if dissenters > 0 {
        text.push_str(&format!(
            "; {} dissenting view{} recorded",
            dissenters,
            if dissenters == 1 { "" } else { "s" }
        ));
    }
    text.push('.');
    text
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agreement_labels() {
        assert_eq!(agreement_label(1.0), "strong consensus");
        assert_eq!(agreement_label(0.9), "strong consensus");
        assert_eq!(agreement_label(0.7), "clear majority");
        assert_eq!(agreement_label(0.5), "moderate agreement with dissent");
        assert_eq!(agreement_label(0.49), "weak consensus");
    }

    #[test]
    fn test_rationale_mentions_dissent() {
        let text = rationale_for("Use X", 0.708, 2, 3);
        assert_eq!(
            text,
            "Clear majority: 2 of 3 advisors back \"Use X\" (71% of weight); 1 dissenting view recorded."
        );
        let unanimous = rationale_for("Use X", 1.0, 3, 3);
        assert!(unanimous.starts_with("Strong consensus"));
        assert!(!unanimous.contains("dissenting"));
    }

    #[test]
    fn test_summary_from_opinions() {
        let opinions = vec![
            Opinion::new("a", "A", "x", 0.4)
                .with_concern("c1")
                .with_priority(Priority::High),
            Opinion::new("b", "B", "y", 0.8)
                .with_concern("c2")
                .with_opportunity("o1")
                .with_priority(Priority::High),
        ];
        let summary = DecisionSummary::from_opinions(&opinions);
        assert_eq!(summary.opinion_count, 2);
        assert!((summary.mean_confidence - 0.6).abs() < 1e-9);
        assert_eq!(summary.concern_count, 2);
        assert_eq!(summary.opportunity_count, 1);
        assert_eq!(summary.priority_histogram.get(&Priority::High), Some(&2));
    }
}
