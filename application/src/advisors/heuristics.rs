//! Helpers shared by the built-in advisors
//!
//! Built-in advisors are rule-based: they scan the question and context for
//! keywords in their field and map what they find onto a small shared
//! vocabulary of recommendations, so that independent advisors can agree.

use council_domain::{AdvisorProfile, Entry, EntryKind};
use serde_json::{Map, Value};

/// Recommendation texts shared across the built-in advisors
pub mod recommendations {
    pub const PROCEED_PHASED: &str = "Proceed with a phased rollout";
    pub const PILOT_FIRST: &str = "Run a limited pilot before committing";
    pub const HOLD_FOR_REVIEW: &str = "Hold until a security review is complete";
    pub const DEFER_FOR_BUDGET: &str = "Defer until budget is secured";
    pub const PROCEED_WITH_SAFEGUARDS: &str = "Proceed with standard safeguards";
}

/// Keywords from `keywords` that occur in the lowercased text
pub(crate) fn keyword_hits<'a>(text: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .copied()
        .filter(|k| lowered.contains(k))
        .collect()
}

/// Default weighting: a floor for any advisor, plus a step per matching
/// expertise tag, plus a bonus when the context names the advisor's field.
pub(crate) fn overlap_weight(
    profile: &AdvisorProfile,
    question: &str,
    context: &Map<String, Value>,
) -> f64 {
    let matches = profile.matching_expertise(question).len() as f64;
    let domain_bonus = match context.get("domain").and_then(Value::as_str) {
        Some(domain) if profile.expertise.iter().any(|e| e == &domain.to_lowercase()) => 0.2,
        _ => 0.0,
    };
    (0.4 + 0.2 * matches + domain_bonus).min(1.0)
}

/// Confidence penalty for a topic already full of concerns from others.
///
/// Each outside concern lowers confidence by 0.05, up to 0.2.
pub(crate) fn concern_pressure(related: &[Entry], own_id: &str) -> f64 {
    let outside = related
        .iter()
        .filter(|e| e.kind == EntryKind::Concern && e.author != own_id)
        .count();
    (outside as f64 * 0.05).min(0.2)
}

/// A numeric context value, accepting JSON numbers and numeric strings
pub(crate) fn context_number(context: &Map<String, Value>, key: &str) -> Option<f64> {
    match context.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A boolean context flag, accepting `true`/`"true"`/`"yes"`
pub(crate) fn context_flag(context: &Map<String, Value>, key: &str) -> bool {
    match context.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

/// Number of facts recalled from earlier rounds
pub(crate) fn recalled_count(context: &Map<String, Value>) -> usize {
    context
        .get(crate::ports::memory_recall::RECALLED_FACTS_KEY)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::{EntryId, NewEntry};
    use serde_json::json;

    #[test]
    fn test_keyword_hits_is_case_insensitive() {
        let hits = keyword_hits("Migrate the DATABASE to Postgres", &["database", "cache"]);
        assert_eq!(hits, vec!["database"]);
    }

    #[test]
    fn test_overlap_weight() {
        let profile = AdvisorProfile::new("finance", "Finance", ["budget", "cost"]);
        let mut context = Map::new();
        assert!((overlap_weight(&profile, "unrelated", &context) - 0.4).abs() < 1e-9);
        assert!((overlap_weight(&profile, "budget and cost", &context) - 0.8).abs() < 1e-9);
        context.insert("domain".into(), json!("Budget"));
        assert!((overlap_weight(&profile, "budget and cost", &context) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_concern_pressure_ignores_own_concerns() {
        let entry = |author: &str, n: u64| {
            Entry::from_draft(
                EntryId(n),
                "t",
                Utc::now(),
                NewEntry::new(author, EntryKind::Concern, "c"),
            )
        };
        let related: Vec<Entry> = (0..6).map(|n| entry("risk", n)).chain([entry("me", 7)]).collect();
        assert!((concern_pressure(&related, "me") - 0.2).abs() < 1e-9);
        assert_eq!(concern_pressure(&related[..0], "me"), 0.0);
    }

    #[test]
    fn test_context_readers() {
        let mut context = Map::new();
        context.insert("budget".into(), json!(1000));
        context.insert("cost".into(), json!(" 250.5 "));
        context.insert("incident".into(), json!("yes"));
        assert_eq!(context_number(&context, "budget"), Some(1000.0));
        assert_eq!(context_number(&context, "cost"), Some(250.5));
        assert_eq!(context_number(&context, "missing"), None);
        assert!(context_flag(&context, "incident"));
        assert!(!context_flag(&context, "budget"));
    }
}
