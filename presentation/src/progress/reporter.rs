//! Progress reporting for deliberation rounds

use colored::Colorize;
use council_application::DeliberationProgress;
use council_domain::Decision;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

/// Reports progress during a round with a progress bar
pub struct ProgressReporter {
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn bar(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.round_bar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliberationProgress for ProgressReporter {
    fn on_round_start(&self, topic: &str, selected: &[String]) {
        let pb = ProgressBar::new(selected.len() as u64);
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Deliberating {}", topic));
        pb.set_message("Consulting advisors...");

        *self.bar() = Some(pb);
    }

    fn on_advisor_complete(&self, advisor_id: &str, success: bool) {
        if let Some(pb) = self.bar().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), advisor_id)
            } else {
                format!("{} {}", "x".red(), advisor_id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_deadline(&self, timed_out: &[String]) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_message(format!("{} {}", "deadline:".yellow(), timed_out.join(", ")));
        }
    }

    fn on_round_complete(&self, _decision: &Decision) {
        if let Some(pb) = self.bar().take() {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DeliberationProgress for SimpleProgress {
    fn on_round_start(&self, topic: &str, selected: &[String]) {
        println!(
            "{} {} ({} advisors: {})",
            "->".cyan(),
            topic.bold(),
            selected.len(),
            selected.join(", ")
        );
    }

    fn on_advisor_complete(&self, advisor_id: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), advisor_id);
        } else {
            println!("  {} {} (failed)", "x".red(), advisor_id);
        }
    }

    fn on_deadline(&self, timed_out: &[String]) {
        for id in timed_out {
            println!("  {} {} (timed out)", "x".yellow(), id);
        }
    }

    fn on_round_complete(&self, _decision: &Decision) {
        println!();
    }
}
