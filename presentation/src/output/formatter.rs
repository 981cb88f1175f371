//! Output formatter trait

use council_domain::DeliberationRecord;

/// Trait for formatting deliberation results
pub trait OutputFormatter {
    /// Decision, every opinion and the round statistics
    fn format(&self, record: &DeliberationRecord) -> String;

    /// Format as JSON
    fn format_json(&self, record: &DeliberationRecord) -> String;

    /// Decision only (concise output)
    fn format_decision_only(&self, record: &DeliberationRecord) -> String;
}
