//! Console output formatter for deliberation results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_application::{Advisor, Explanation};
use council_domain::aggregation::decision::agreement_label;
use council_domain::core::string::truncate;
use council_domain::{
    AdvisorPerformance, DeliberationRecord, Opinion, OutputFormat, Priority,
};
use std::sync::Arc;

/// Longest question or recommendation shown in one-line listings
const LISTING_WIDTH: usize = 60;

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a record in the requested format
    pub fn render(record: &DeliberationRecord, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(record),
            OutputFormat::Decision => Self::format_decision_only(record),
            OutputFormat::Json => Self::format_json(record),
        }
    }

    /// Format the complete round
    pub fn format(record: &DeliberationRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Advisor Council"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            record.question
        ));
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), record.topic));
        output.push_str(&format!(
            "{} {}\n",
            "Advisors:".cyan().bold(),
            record.stats.selected.join(", ")
        ));

        output.push_str(&Self::section_header("Opinions"));
        for opinion in &record.opinions {
            output.push_str(&Self::opinion(opinion, record));
        }

        let stats = &record.stats;
        if !stats.failed.is_empty() || !stats.timed_out.is_empty() {
            output.push_str(&Self::section_header("Missing"));
            for id in &stats.failed {
                output.push_str(&format!("  {} {} (failed)\n", "x".red(), id));
            }
            for id in &stats.timed_out {
                output.push_str(&format!("  {} {} (timed out)\n", "x".yellow(), id));
            }
        }

        output.push_str(&Self::section_header("Decision"));
        output.push_str(&Self::decision_block(record));

        if !record.decision.alternative_views.is_empty() {
            output.push_str(&format!("\n{}\n", "Alternative views:".yellow().bold()));
            for (advisor, view) in &record.decision.alternative_views {
                output.push_str(&format!("  * {}: {}\n", advisor, view));
            }
        }

        output.push_str(&format!(
            "\n{} {}/{} responded, {} recalled facts, {:.2}s\n",
            "Round:".dimmed(),
            stats.responded.len(),
            stats.selected.len(),
            stats.recalled_facts,
            record.elapsed.as_secs_f64()
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(record: &DeliberationRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    /// Decision only (concise output)
    pub fn format_decision_only(record: &DeliberationRecord) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Council Decision ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), record.question));
        output.push_str(&format!(
            "{} {}\n\n",
            "Advisors consulted:".dimmed(),
            record.stats.responded.join(", ")
        ));
        output.push_str(&Self::decision_block(record));

        output
    }

    fn decision_block(record: &DeliberationRecord) -> String {
        let decision = &record.decision;
        let mut output = format!(
            "{} {}\n",
            "Recommendation:".green().bold(),
            decision.recommendation.bold()
        );
        output.push_str(&format!(
            "Confidence {:.0}%  Agreement {:.0}% ({})  Priority {}\n",
            decision.confidence * 100.0,
            decision.agreement * 100.0,
            agreement_label(decision.agreement),
            Self::priority(decision.priority)
        ));
        output.push_str(&format!(
            "Support {}  via {}",
            decision.support_summary(),
            decision.resolved_by
        ));
        if decision.resolved_by != decision.method {
            output.push_str(&format!(" (requested {})", decision.method));
        }
        output.push('\n');

        if !decision.rationale.is_empty() {
            output.push_str(&format!("\n{}\n", decision.rationale));
        }
        if !decision.dissenting.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Dissent:".yellow().bold(),
                decision.dissenting.join(", ")
            ));
        }
        output
    }

    fn opinion(opinion: &Opinion, record: &DeliberationRecord) -> String {
        let weight = record
            .stats
            .weights
            .get(&opinion.advisor_id)
            .map(|w| format!(", weight {:.2}", w))
            .unwrap_or_default();
        let mut output = format!(
            "\n{}\n{} ({:.0}% confidence{}, {})\n",
            format!("── {} ──", opinion.advisor_name).yellow().bold(),
            opinion.recommendation,
            opinion.confidence * 100.0,
            weight,
            Self::priority(opinion.priority)
        );
        if !opinion.rationale.is_empty() {
            output.push_str(&Self::indent(&opinion.rationale, "  "));
            output.push('\n');
        }
        for concern in &opinion.concerns {
            output.push_str(&format!("  {} {}\n", "!".red(), concern));
        }
        for opportunity in &opinion.opportunities {
            output.push_str(&format!("  {} {}\n", "+".green(), opportunity));
        }
        output
    }

    fn priority(priority: Priority) -> String {
        match priority {
            Priority::Critical => priority.as_str().red().bold().to_string(),
            Priority::High => priority.as_str().red().to_string(),
            Priority::Medium => priority.as_str().yellow().to_string(),
            Priority::Low | Priority::Informational => priority.as_str().dimmed().to_string(),
        }
    }

    /// One line per past round, newest first
    pub fn format_history(records: &[DeliberationRecord]) -> String {
        if records.is_empty() {
            return "No deliberations yet.\n".to_string();
        }
        let mut output = String::new();
        for record in records {
            output.push_str(&format!(
                "{} {} {}\n    {} ({:.0}%, {})\n",
                record.completed_at.format("%H:%M:%S").to_string().dimmed(),
                record.topic.cyan(),
                truncate(&record.question, LISTING_WIDTH),
                truncate(&record.decision.recommendation, LISTING_WIDTH).bold(),
                record.decision.confidence * 100.0,
                record.decision.support_summary()
            ));
        }
        output
    }

    /// Per-advisor participation table
    pub fn format_performance(performance: &[AdvisorPerformance]) -> String {
        if performance.is_empty() {
            return "No advisor has taken part in a round yet.\n".to_string();
        }
        let mut output = format!(
            "{:<16} {:>6} {:>9} {:>9} {:>11}\n",
            "advisor".bold(),
            "rounds".bold(),
            "support".bold(),
            "dissent".bold(),
            "confidence".bold()
        );
        for entry in performance {
            output.push_str(&format!(
                "{:<16} {:>6} {:>8.0}% {:>8.0}% {:>10.0}%\n",
                entry.advisor_id,
                entry.participations,
                entry.support_rate() * 100.0,
                entry.dissent_rate() * 100.0,
                entry.mean_confidence() * 100.0
            ));
        }
        output
    }

    /// Registered advisors with their expertise
    pub fn format_advisors(advisors: &[Arc<dyn Advisor>]) -> String {
        if advisors.is_empty() {
            return "No advisors registered.\n".to_string();
        }
        let mut output = String::new();
        for advisor in advisors {
            let profile = advisor.profile();
            output.push_str(&format!(
                "  {:<16} {} {}\n",
                profile.id.cyan(),
                profile.name,
                format!("[{}]", profile.expertise.join(", ")).dimmed()
            ));
        }
        output
    }

    pub fn format_explanation(explanation: Option<&Explanation>, topic: &str) -> String {
        match explanation {
            Some(explanation) => format!("{}\n", explanation),
            None => format!("Nothing has been recorded on topic {:?}.\n", topic),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, record: &DeliberationRecord) -> String {
        Self::format(record)
    }

    fn format_json(&self, record: &DeliberationRecord) -> String {
        Self::format_json(record)
    }

    fn format_decision_only(&self, record: &DeliberationRecord) -> String {
        Self::format_decision_only(record)
    }
}
