//! Opinion aggregation
//!
//! The [`Aggregator`] reduces a round's opinions plus a weight per advisor to a
//! single [`Decision`]. Every method is pure given the same inputs.
//!
//! ```text
//! Hybrid ──▶ unanimous? ──yes──▶ Unanimous
//!              │ no
//!              ▼
//!        ≥ 66% by count? ──yes──▶ Supermajority (supplied weights)
//!              │ no
//!              ▼
//!        WeightedMajority with (weight + confidence) / 2
//! ```

use super::decision::{Decision, DecisionSummary, rationale_for};
use super::method::AggregationMethod;
use super::tuning::AggregationTuning;
use crate::advisor::{Opinion, Priority};
use crate::core::error::DomainError;
use crate::knowledge::clamp_unit;
use std::collections::{BTreeMap, HashMap};

/// Weight assumed for an advisor missing from the weight map
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Opinions sharing one recommendation text
struct Group<'a> {
    recommendation: &'a str,
    members: Vec<usize>,
    score: f64,
}

/// Reduces opinions to a decision
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    tuning: AggregationTuning,
}

impl Aggregator {
    pub fn new(tuning: AggregationTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &AggregationTuning {
        &self.tuning
    }

    /// Reduce `opinions` with the given method.
    ///
    /// `weights` maps advisor id to weight; missing advisors weigh
    /// [`DEFAULT_WEIGHT`], negative weights count as zero.
    ///
    /// # Errors
    /// - [`DomainError::NoOpinions`] when `opinions` is empty
    /// - [`DomainError::ZeroTotalWeight`] when a weighted majority over several
    ///   recommendations has zero total score; see [`Aggregator::reduce_by_count`]
    pub fn reduce(
        &self,
        opinions: &[Opinion],
        weights: &HashMap<String, f64>,
        method: AggregationMethod,
    ) -> Result<Decision, DomainError> {
        if opinions.is_empty() {
            return Err(DomainError::NoOpinions);
        }
        let opinions: Vec<Opinion> = opinions.iter().cloned().map(Opinion::clamped).collect();
        let supplied = |o: &Opinion| weight_of(weights, &o.advisor_id);

        match method {
            AggregationMethod::WeightedMajority => {
                self.weighted_majority(&opinions, supplied, method)
            }
            AggregationMethod::Supermajority => self.supermajority(&opinions, supplied, method),
            AggregationMethod::Unanimous => match self.unanimous(&opinions, method) {
                Some(decision) => Ok(decision),
                None => self.weighted_majority(&opinions, |_| 1.0, method),
            },
            AggregationMethod::ConfidenceWeighted => {
                self.weighted_majority(&opinions, |o| o.confidence, method)
            }
            AggregationMethod::Hybrid => self.hybrid(&opinions, supplied),
        }
    }

    fn hybrid(
        &self,
        opinions: &[Opinion],
        supplied: impl Fn(&Opinion) -> f64,
    ) -> Result<Decision, DomainError> {
        let method = AggregationMethod::Hybrid;
        if let Some(decision) = self.unanimous(opinions, method) {
            return Ok(decision);
        }

        let threshold = self.tuning.supermajority_threshold(opinions.len());
        let counts = group_by_recommendation(opinions, |_| 1.0);
        if counts.iter().any(|g| g.members.len() >= threshold) {
            return self.supermajority(opinions, supplied, method);
        }

        self.weighted_majority(opinions, |o| (supplied(o) + o.confidence) / 2.0, method)
    }

    fn weighted_majority(
        &self,
        opinions: &[Opinion],
        weight: impl Fn(&Opinion) -> f64,
        requested: AggregationMethod,
    ) -> Result<Decision, DomainError> {
        self.majority(opinions, |o| weight(o) * o.confidence, requested)
    }

    /// Head-count majority: every opinion scores 1 whatever its weight or
    /// confidence. Resolves rounds whose weighted score is zero.
    pub fn reduce_by_count(
        &self,
        opinions: &[Opinion],
        requested: AggregationMethod,
    ) -> Result<Decision, DomainError> {
        if opinions.is_empty() {
            return Err(DomainError::NoOpinions);
        }
        let opinions: Vec<Opinion> = opinions.iter().cloned().map(Opinion::clamped).collect();
        self.majority(&opinions, |_| 1.0, requested)
    }

    fn majority(
        &self,
        opinions: &[Opinion],
        score: impl Fn(&Opinion) -> f64,
        requested: AggregationMethod,
    ) -> Result<Decision, DomainError> {
        let groups = group_by_recommendation(opinions, score);
        let total: f64 = groups.iter().map(|g| g.score).sum();

        // A single group holds every opinion, whatever the scores
        let (winner, agreement) = if groups.len() == 1 {
            (&groups[0], 1.0)
        } else if total <= 0.0 {
            return Err(DomainError::ZeroTotalWeight);
        } else {
            let winner = &groups[leading_group(&groups)];
            (winner, clamp_unit(winner.score / total))
        };

        let mean_confidence = winner
            .members
            .iter()
            .map(|&i| opinions[i].confidence)
            .sum::<f64>()
            / winner.members.len() as f64;
        let confidence = clamp_unit(mean_confidence * self.tuning.confidence_factor(agreement));
        let priority = self.derive_priority(opinions, agreement);

        Ok(self.decide(
            opinions,
            winner.recommendation,
            agreement,
            confidence,
            priority,
            requested,
            AggregationMethod::WeightedMajority,
        ))
    }

    fn supermajority(
        &self,
        opinions: &[Opinion],
        weight: impl Fn(&Opinion) -> f64,
        requested: AggregationMethod,
    ) -> Result<Decision, DomainError> {
        let threshold = self.tuning.supermajority_threshold(opinions.len());
        let groups = group_by_recommendation(opinions, &weight);

        let Some(winner) = groups.iter().find(|g| g.members.len() >= threshold) else {
            return self.weighted_majority(opinions, |_| 1.0, requested);
        };

        // The winner is chosen by head count; with no weight to share,
        // agreement is its share of the responders.
        let total: f64 = groups.iter().map(|g| g.score).sum();
        let agreement = if total > 0.0 {
            clamp_unit(winner.score / total)
        } else {
            winner.members.len() as f64 / opinions.len() as f64
        };
        let confidence = clamp_unit(agreement * self.tuning.supermajority_confidence_factor);
        let priority = self.derive_priority(opinions, agreement);

        Ok(self.decide(
            opinions,
            winner.recommendation,
            agreement,
            confidence,
            priority,
            requested,
            AggregationMethod::Supermajority,
        ))
    }

    /// Decision for identical recommendations, or `None` if anyone differs
    fn unanimous(&self, opinions: &[Opinion], requested: AggregationMethod) -> Option<Decision> {
        let first = opinions.first()?;
        if opinions
            .iter()
            .any(|o| o.recommendation != first.recommendation)
        {
            return None;
        }

        Some(self.decide(
            opinions,
            &first.recommendation,
            1.0,
            clamp_unit(self.tuning.unanimous_confidence),
            Priority::Critical,
            requested,
            AggregationMethod::Unanimous,
        ))
    }

    /// Critical if anyone says so; High if most say so and agreement is high;
    /// Low on weak agreement; Medium otherwise.
    fn derive_priority(&self, opinions: &[Opinion], agreement: f64) -> Priority {
        if opinions.iter().any(|o| o.priority == Priority::Critical) {
            return Priority::Critical;
        }
        let high = opinions
            .iter()
            .filter(|o| o.priority == Priority::High)
            .count();
        if high * 2 > opinions.len() && agreement > self.tuning.high_priority_agreement {
            Priority::High
        } else if agreement < self.tuning.low_priority_agreement {
            Priority::Low
        } else {
            Priority::Medium
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn decide(
        &self,
        opinions: &[Opinion],
        recommendation: &str,
        agreement: f64,
        confidence: f64,
        priority: Priority,
        requested: AggregationMethod,
        resolved_by: AggregationMethod,
    ) -> Decision {
        let mut supporting = Vec::new();
        let mut dissenting = Vec::new();
        let mut alternative_views = BTreeMap::new();

        for opinion in opinions {
            if opinion.recommendation == recommendation {
                supporting.push(opinion.advisor_id.clone());
            } else {
                dissenting.push(opinion.advisor_id.clone());
                alternative_views.insert(
                    opinion.advisor_id.clone(),
                    opinion.recommendation.clone(),
                );
            }
        }

        Decision {
            recommendation: recommendation.to_string(),
            confidence,
            method: requested,
            resolved_by,
            agreement,
            rationale: rationale_for(recommendation, agreement, supporting.len(), opinions.len()),
            supporting,
            dissenting,
            alternative_views,
            priority,
            summary: DecisionSummary::from_opinions(opinions),
        }
    }
}

fn weight_of(weights: &HashMap<String, f64>, advisor_id: &str) -> f64 {
    let weight = weights.get(advisor_id).copied().unwrap_or(DEFAULT_WEIGHT);
    if weight.is_nan() { 0.0 } else { weight.max(0.0) }
}

/// Group opinions by identical recommendation, in first-appearance order
fn group_by_recommendation<'a>(
    opinions: &'a [Opinion],
    score: impl Fn(&Opinion) -> f64,
) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    for (index, opinion) in opinions.iter().enumerate() {
        let contribution = score(opinion);
        match groups
            .iter_mut()
            .find(|g| g.recommendation == opinion.recommendation)
        {
            Some(group) => {
                group.members.push(index);
                group.score += contribution;
            }
            None => groups.push(Group {
                recommendation: &opinion.recommendation,
                members: vec![index],
                score: contribution,
            }),
        }
    }
    groups
}

/// Index of the highest-scoring group. Ties go to the larger group, then to
/// the one that appeared first.
fn leading_group(groups: &[Group<'_>]) -> usize {
    let mut best = 0;
    for (index, group) in groups.iter().enumerate().skip(1) {
        let leader = &groups[best];
        if group.score > leader.score
            || (group.score == leader.score && group.members.len() > leader.members.len())
        {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn opinion(id: &str, recommendation: &str, confidence: f64) -> Opinion {
        Opinion::new(id, id.to_uppercase(), recommendation, confidence)
    }

    fn weights(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn scenario() -> (Vec<Opinion>, HashMap<String, f64>) {
        (
            vec![
                opinion("a", "Use X", 0.9),
                opinion("b", "Use Y", 0.7),
                opinion("c", "Use X", 0.6),
            ],
            weights(&[("a", 0.8), ("b", 0.6), ("c", 0.5)]),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_empty_input_fails() {
        let result = Aggregator::default().reduce(&[], &HashMap::new(), AggregationMethod::Hybrid);
        assert_eq!(result.unwrap_err(), DomainError::NoOpinions);
    }

    #[test]
    fn test_weighted_majority_scenario() {
        let (opinions, weights) = scenario();
        let decision = Aggregator::default()
            .reduce(&opinions, &weights, AggregationMethod::WeightedMajority)
            .unwrap();

        assert_eq!(decision.recommendation, "Use X");
        assert_close(decision.agreement, 1.02 / 1.44);
        assert_close(decision.confidence, 0.75);
        assert_eq!(decision.supporting, vec!["a", "c"]);
        assert_eq!(decision.dissenting, vec!["b"]);
        assert_eq!(decision.alternative_views.get("b").map(String::as_str), Some("Use Y"));
        assert_eq!(decision.priority, Priority::Medium);
        assert_eq!(decision.resolved_by, AggregationMethod::WeightedMajority);
    }

    #[test]
    fn test_weighted_majority_confidence_band_penalty() {
        // X: 0.5, Y: 0.4, Z: 0.3 -> agreement 0.5/1.2 ≈ 0.417 -> ×0.85
        let opinions = vec![
            opinion("a", "X", 0.5),
            opinion("b", "Y", 0.4),
            opinion("c", "Z", 0.3),
        ];
        let decision = Aggregator::default()
            .reduce(&opinions, &HashMap::new(), AggregationMethod::WeightedMajority)
            .unwrap();
        assert_eq!(decision.recommendation, "X");
        assert_close(decision.agreement, 0.5 / 1.2);
        assert_close(decision.confidence, 0.5 * 0.85);
        assert_eq!(decision.priority, Priority::Low);
    }

    #[test]
    fn test_zero_total_weight_is_an_error() {
        let opinions = vec![opinion("a", "X", 0.9), opinion("b", "Y", 0.5)];
        let result = Aggregator::default().reduce(
            &opinions,
            &weights(&[("a", 0.0), ("b", 0.0)]),
            AggregationMethod::WeightedMajority,
        );
        assert_eq!(result.unwrap_err(), DomainError::ZeroTotalWeight);
    }

    #[test]
    fn test_supermajority_wins_by_count() {
        let opinions = vec![
            opinion("a", "X", 0.9),
            opinion("b", "X", 0.5),
            opinion("c", "Y", 0.9),
        ];
        let decision = Aggregator::default()
            .reduce(&opinions, &HashMap::new(), AggregationMethod::Supermajority)
            .unwrap();

        assert_eq!(decision.recommendation, "X");
        assert_eq!(decision.resolved_by, AggregationMethod::Supermajority);
        assert_close(decision.agreement, 2.0 / 3.0);
        assert_close(decision.confidence, 2.0 / 3.0 * 0.85);
    }

    #[test]
    fn test_supermajority_falls_back_to_uniform_weighted_majority() {
        let opinions = vec![
            opinion("a", "X", 0.9),
            opinion("b", "Y", 0.5),
            opinion("c", "Z", 0.4),
        ];
        // Heavy weight on b must be ignored by the uniform fallback
        let decision = Aggregator::default()
            .reduce(
                &opinions,
                &weights(&[("b", 1.0), ("a", 0.01), ("c", 0.01)]),
                AggregationMethod::Supermajority,
            )
            .unwrap();

        assert_eq!(decision.recommendation, "X");
        assert_eq!(decision.method, AggregationMethod::Supermajority);
        assert_eq!(decision.resolved_by, AggregationMethod::WeightedMajority);
    }

    #[test]
    fn test_unanimous_agreement() {
        let opinions = vec![
            opinion("a", "Ship", 0.4),
            opinion("b", "Ship", 0.6),
            opinion("c", "Ship", 0.2),
        ];
        let decision = Aggregator::default()
            .reduce(&opinions, &HashMap::new(), AggregationMethod::Unanimous)
            .unwrap();

        assert_eq!(decision.agreement, 1.0);
        assert!(decision.dissenting.is_empty());
        assert_eq!(decision.confidence, 0.95);
        assert_eq!(decision.priority, Priority::Critical);
        assert!(decision.is_unanimous());
    }

    #[test]
    fn test_unanimous_falls_back_when_split() {
        let opinions = vec![opinion("a", "Ship", 0.9), opinion("b", "Wait", 0.3)];
        let decision = Aggregator::default()
            .reduce(
                &opinions,
                &weights(&[("a", 0.1), ("b", 1.0)]),
                AggregationMethod::Unanimous,
            )
            .unwrap();

        assert_eq!(decision.recommendation, "Ship");
        assert_eq!(decision.resolved_by, AggregationMethod::WeightedMajority);
        assert_ne!(decision.priority, Priority::Critical);
    }

    #[test]
    fn test_confidence_weighted_ignores_supplied_weights() {
        let opinions = vec![
            opinion("a", "X", 0.9),
            opinion("b", "Y", 0.3),
            opinion("c", "Z", 0.5),
        ];
        let decision = Aggregator::default()
            .reduce(
                &opinions,
                &weights(&[("a", 0.0), ("b", 1.0), ("c", 0.0)]),
                AggregationMethod::ConfidenceWeighted,
            )
            .unwrap();

        assert_eq!(decision.recommendation, "X");
        assert_close(decision.agreement, 0.81 / (0.81 + 0.09 + 0.25));
    }

    #[test]
    fn test_hybrid_prefers_unanimity() {
        let opinions = vec![opinion("a", "Ship", 0.5), opinion("b", "Ship", 0.5)];
        let decision = Aggregator::default()
            .reduce(&opinions, &HashMap::new(), AggregationMethod::Hybrid)
            .unwrap();
        assert_eq!(decision.method, AggregationMethod::Hybrid);
        assert_eq!(decision.resolved_by, AggregationMethod::Unanimous);
        assert_eq!(decision.confidence, 0.95);
    }

    #[test]
    fn test_hybrid_delegates_to_supermajority() {
        let opinions = vec![
            opinion("a", "Ship", 0.5),
            opinion("b", "Ship", 0.5),
            opinion("c", "Wait", 0.9),
        ];
        let decision = Aggregator::default()
            .reduce(&opinions, &HashMap::new(), AggregationMethod::Hybrid)
            .unwrap();
        assert_eq!(decision.recommendation, "Ship");
        assert_eq!(decision.resolved_by, AggregationMethod::Supermajority);
    }

    #[test]
    fn test_hybrid_blends_weight_and_confidence() {
        let opinions = vec![
            opinion("a", "X", 0.9),
            opinion("b", "Y", 0.3),
            opinion("c", "Z", 0.5),
        ];
        let weights = weights(&[("a", 0.2), ("b", 1.0), ("c", 0.5)]);

        // Plain weighted majority picks Y (0.30 vs 0.18 vs 0.25)
        let plain = Aggregator::default()
            .reduce(&opinions, &weights, AggregationMethod::WeightedMajority)
            .unwrap();
        assert_eq!(plain.recommendation, "Y");

        // Blended: X 0.55×0.9, Y 0.65×0.3, Z 0.5×0.5
        let hybrid = Aggregator::default()
            .reduce(&opinions, &weights, AggregationMethod::Hybrid)
            .unwrap();
        assert_eq!(hybrid.recommendation, "X");
        assert_close(hybrid.agreement, 0.495 / (0.495 + 0.195 + 0.25));
        assert_eq!(hybrid.resolved_by, AggregationMethod::WeightedMajority);
    }

    #[test]
    fn test_single_opinion_under_every_method() {
        for confidence in [0.7, 0.0] {
            let opinions = vec![opinion("solo", "Only option", confidence)];
            for weight in [0.6, 0.0] {
                for method in AggregationMethod::ALL {
                    let decision = Aggregator::default()
                        .reduce(&opinions, &weights(&[("solo", weight)]), method)
                        .unwrap_or_else(|e| {
                            panic!("method {} confidence {}: {}", method, confidence, e)
                        });
                    assert_eq!(decision.agreement, 1.0, "method {}", method);
                    assert_eq!(decision.recommendation, "Only option");
                    assert!(decision.dissenting.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_supermajority_with_zero_weights_uses_head_count() {
        let opinions = vec![
            opinion("a", "X", 0.7),
            opinion("b", "X", 0.7),
            opinion("c", "Y", 0.7),
        ];
        let zero = weights(&[("a", 0.0), ("b", 0.0), ("c", 0.0)]);
        for method in [AggregationMethod::Supermajority, AggregationMethod::Hybrid] {
            let decision = Aggregator::default().reduce(&opinions, &zero, method).unwrap();
            assert_eq!(decision.recommendation, "X");
            assert_eq!(decision.resolved_by, AggregationMethod::Supermajority);
            assert_close(decision.agreement, 2.0 / 3.0);
            assert_close(decision.confidence, 2.0 / 3.0 * 0.85);
        }
    }

    #[test]
    fn test_reduce_by_count_ignores_weight_and_confidence() {
        let opinions = vec![
            opinion("a", "X", 0.0),
            opinion("b", "Y", 0.0),
            opinion("c", "Y", 0.0),
        ];
        let aggregator = Aggregator::default();
        assert_eq!(
            aggregator
                .reduce(&opinions, &HashMap::new(), AggregationMethod::WeightedMajority)
                .unwrap_err(),
            DomainError::ZeroTotalWeight
        );

        let decision = aggregator
            .reduce_by_count(&opinions, AggregationMethod::WeightedMajority)
            .unwrap();
        assert_eq!(decision.recommendation, "Y");
        assert_close(decision.agreement, 2.0 / 3.0);
        assert_eq!(decision.confidence, 0.0);
        assert_eq!(decision.dissenting, vec!["a"]);
        assert_eq!(
            aggregator
                .reduce_by_count(&[], AggregationMethod::Hybrid)
                .unwrap_err(),
            DomainError::NoOpinions
        );
    }

    #[test]
    fn test_partition_and_bounds_hold_for_all_methods() {
        let sets = vec![
            scenario().0,
            vec![
                opinion("a", "X", 1.0),
                opinion("b", "Y", 0.0),
                opinion("c", "Y", 0.2),
                opinion("d", "Z", 0.7),
                opinion("e", "X", 0.3),
            ],
            vec![opinion("a", "X", 0.5), opinion("b", "X", 0.5)],
            vec![
                opinion("a", "P", 0.8),
                opinion("b", "Q", 0.8),
                opinion("c", "R", 0.8),
                opinion("d", "S", 0.8),
            ],
        ];
        let weights = weights(&[("a", 0.9), ("b", 0.4), ("c", 0.7), ("d", 0.2), ("e", 1.0)]);

        for opinions in &sets {
            let all: HashSet<&str> = opinions.iter().map(|o| o.advisor_id.as_str()).collect();
            for method in AggregationMethod::ALL {
                let decision = Aggregator::default()
                    .reduce(opinions, &weights, method)
                    .unwrap();

                let supporting: HashSet<&str> =
                    decision.supporting.iter().map(String::as_str).collect();
                let dissenting: HashSet<&str> =
                    decision.dissenting.iter().map(String::as_str).collect();
                assert!(supporting.is_disjoint(&dissenting));
                assert_eq!(&supporting | &dissenting, all);
                assert_eq!(decision.participant_count(), opinions.len());
                assert!((0.0..=1.0).contains(&decision.confidence));
                assert!((0.0..=1.0).contains(&decision.agreement));
                assert_eq!(decision.alternative_views.len(), decision.dissenting.len());
            }
        }
    }

    #[test]
    fn test_weighted_majority_is_monotonic_in_weight() {
        let (opinions, base) = scenario();
        let score_of_x = |weights: &HashMap<String, f64>| {
            let groups = group_by_recommendation(&opinions, |o| {
                weight_of(weights, &o.advisor_id) * o.confidence
            });
            groups
                .iter()
                .find(|g| g.recommendation == "Use X")
                .map(|g| g.score)
                .unwrap()
        };

        let mut previous = score_of_x(&base);
        for step in 1..=5 {
            let mut bumped = base.clone();
            bumped.insert("a".to_string(), 0.8 + step as f64 * 0.1);
            let score = score_of_x(&bumped);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_priority_derivation() {
        let aggregator = Aggregator::default();
        let high = |id: &str| opinion(id, "X", 0.8).with_priority(Priority::High);

        let critical = vec![high("a"), opinion("b", "Y", 0.1).with_priority(Priority::Critical)];
        assert_eq!(aggregator.derive_priority(&critical, 0.9), Priority::Critical);

        let mostly_high = vec![high("a"), high("b"), opinion("c", "X", 0.5)];
        assert_eq!(aggregator.derive_priority(&mostly_high, 0.8), Priority::High);
        assert_eq!(aggregator.derive_priority(&mostly_high, 0.7), Priority::Medium);

        let half_high = vec![high("a"), opinion("b", "X", 0.5)];
        assert_eq!(aggregator.derive_priority(&half_high, 0.9), Priority::Medium);
        assert_eq!(aggregator.derive_priority(&half_high, 0.3), Priority::Low);
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped_before_reduction() {
        let mut wild = opinion("a", "X", 0.5);
        wild.confidence = 3.0;
        let decision = Aggregator::default()
            .reduce(&[wild], &HashMap::new(), AggregationMethod::WeightedMajority)
            .unwrap();
        assert_eq!(decision.confidence, 1.0);
    }

    #[test]
    fn test_support_summary() {
        let (opinions, weights) = scenario();
        let decision = Aggregator::default()
            .reduce(&opinions, &weights, AggregationMethod::WeightedMajority)
            .unwrap();
        assert_eq!(decision.support_summary(), "[●●○]");
    }
}
