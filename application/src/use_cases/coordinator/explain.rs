//! Narrative explanations of past rounds, rebuilt from the knowledge log

use council_domain::{Entry, EntryKind};
use std::fmt;

/// Entries shown per section
const SECTION_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ExplainedDecision {
    pub recommendation: String,
    pub confidence: f64,
    pub agreement: Option<f64>,
    pub method: Option<String>,
}

/// What was asked, what was said, and what was decided on one topic
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub topic: String,
    pub question: Option<String>,
    pub insights: Vec<Entry>,
    pub recommendations: Vec<Entry>,
    pub concerns: Vec<Entry>,
    pub decision: Option<ExplainedDecision>,
}

impl Explanation {
    /// Build from a chronological consensus trail. `None` for an empty trail.
    pub fn from_trail(topic: &str, trail: &[Entry]) -> Option<Self> {
        if trail.is_empty() {
            return None;
        }

        let first_of = |kind: EntryKind| -> Vec<Entry> {
            trail
                .iter()
                .filter(|e| e.kind == kind)
                .take(SECTION_LIMIT)
                .cloned()
                .collect()
        };

        let decision = trail
            .iter()
            .rev()
            .find(|e| e.kind == EntryKind::Consensus)
            .map(|e| ExplainedDecision {
                recommendation: e.content.clone(),
                confidence: e.confidence,
                agreement: e.metadata.get("agreement").and_then(|v| v.as_f64()),
                method: e
                    .metadata
                    .get("resolved_by")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            });

        Some(Self {
            topic: topic.to_string(),
            question: trail
                .iter()
                .find(|e| e.kind == EntryKind::Question)
                .map(|e| e.content.clone()),
            insights: first_of(EntryKind::Insight),
            recommendations: first_of(EntryKind::Recommendation),
            concerns: first_of(EntryKind::Concern),
            decision,
        })
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, entries: &[Entry]) -> fmt::Result {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}:", title)?;
    for entry in entries {
        writeln!(
            f,
            "  - [{}] {} ({:.0}%)",
            entry.author,
            entry.content,
            entry.confidence * 100.0
        )?;
    }
    Ok(())
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deliberation on '{}'", self.topic)?;
        if let Some(question) = &self.question {
            writeln!(f, "Question: {}", question)?;
        }
        write_section(f, "Key insights", &self.insights)?;
        write_section(f, "Recommendations", &self.recommendations)?;
        write_section(f, "Concerns raised", &self.concerns)?;

        match &self.decision {
            Some(decision) => {
                write!(
                    f,
                    "Decision: \"{}\" (confidence {:.0}%",
                    decision.recommendation,
                    decision.confidence * 100.0
                )?;
                if let Some(agreement) = decision.agreement {
                    write!(f, ", agreement {:.0}%", agreement * 100.0)?;
                }
                if let Some(method) = &decision.method {
                    write!(f, ", via {}", method)?;
                }
                write!(f, ")")
            }
            None => write!(f, "No decision was reached on this topic."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::{EntryId, NewEntry};

    fn entry(n: u64, author: &str, kind: EntryKind, content: &str, confidence: f64) -> Entry {
        Entry::from_draft(
            EntryId(n),
            "t",
            Utc::now(),
            NewEntry::new(author, kind, content).with_confidence(confidence),
        )
    }

    #[test]
    fn test_empty_trail_has_no_explanation() {
        assert!(Explanation::from_trail("t", &[]).is_none());
    }

    #[test]
    fn test_sections_are_capped() {
        let mut trail = vec![entry(1, "coordinator", EntryKind::Question, "Go?", 1.0)];
        for n in 2..8 {
            trail.push(entry(n, "a", EntryKind::Concern, &format!("c{}", n), 0.5));
        }
        let explanation = Explanation::from_trail("t", &trail).unwrap();
        assert_eq!(explanation.concerns.len(), 3);
        assert_eq!(explanation.concerns[0].content, "c2");
        assert!(explanation.decision.is_none());
        assert!(explanation.to_string().ends_with("No decision was reached on this topic."));
    }

    #[test]
    fn test_render_includes_decision() {
        let mut consensus = entry(3, "coordinator", EntryKind::Consensus, "Use X", 0.75);
        consensus.metadata.insert("agreement".into(), 0.71.into());
        consensus
            .metadata
            .insert("resolved_by".into(), "weighted_majority".into());
        let trail = vec![
            entry(1, "coordinator", EntryKind::Question, "Which one?", 1.0),
            entry(2, "risk", EntryKind::Insight, "X is safer", 0.8),
            consensus,
        ];

        let text = Explanation::from_trail("t", &trail).unwrap().to_string();
        assert!(text.contains("Question: Which one?"));
        assert!(text.contains("  - [risk] X is safer (80%)"));
        assert!(text.contains(
            "Decision: \"Use X\" (confidence 75%, agreement 71%, via weighted_majority)"
        ));
    }
}
