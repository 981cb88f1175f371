//! Progress notification port
//!
//! Defines the interface for reporting progress during a deliberation round.

use council_domain::Decision;

/// Callback for progress updates during a round
///
/// Implementations live in the presentation layer.
pub trait DeliberationProgress: Send + Sync {
    /// Called once advisors are selected, before any of them run
    fn on_round_start(&self, topic: &str, selected: &[String]);

    /// Called as each advisor finishes, successfully or not
    fn on_advisor_complete(&self, advisor_id: &str, success: bool);

    /// Called when the round produced a decision
    fn on_round_complete(&self, decision: &Decision);

    /// Called when the deadline cut the round short
    fn on_deadline(&self, _timed_out: &[String]) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DeliberationProgress for NoProgress {
    fn on_round_start(&self, _topic: &str, _selected: &[String]) {}
    fn on_advisor_complete(&self, _advisor_id: &str, _success: bool) {}
    fn on_round_complete(&self, _decision: &Decision) {}
}
