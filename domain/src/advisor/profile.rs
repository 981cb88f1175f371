//! Advisor identity and expertise

use crate::core::string::tokenize;
use serde::{Deserialize, Serialize};

/// Static description of an advisor: who it is and what it knows about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorProfile {
    pub id: String,
    pub name: String,
    /// Lowercase expertise tags, e.g. `["security", "compliance"]`
    pub expertise: Vec<String>,
}

impl AdvisorProfile {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, expertise: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            expertise: expertise
                .into_iter()
                .map(|s| s.into().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Expertise tags that textually overlap the question.
    ///
    /// A tag overlaps if it appears as a substring of the lowercased question
    /// or shares a token with it (multi-word tags match on any word).
    pub fn matching_expertise(&self, question: &str) -> Vec<&str> {
        let lowered = question.to_lowercase();
        let question_tokens = tokenize(question);

        self.expertise
            .iter()
            .filter(|tag| {
                lowered.contains(tag.as_str())
                    || tokenize(tag).iter().any(|t| question_tokens.contains(t))
            })
            .map(String::as_str)
            .collect()
    }

    pub fn overlaps(&self, question: &str) -> bool {
        !self.matching_expertise(question).is_empty()
    }
}
