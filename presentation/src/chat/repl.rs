//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::{OutputConfig, ReplConfig};
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use council_application::{Coordinator, DeliberateInput};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tracing::warn;

const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    /// Show up to n recent rounds
    History(usize),
    Performance,
    Explain(String),
    Advisors,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`
    pub fn parse(line: &str) -> Self {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "/quit" | "/exit" | "/q" => Self::Quit,
            "/help" | "/h" | "/?" => Self::Help,
            "/history" => match arg {
                "" => Self::History(DEFAULT_HISTORY_LIMIT),
                n => n
                    .parse()
                    .map(Self::History)
                    .unwrap_or_else(|_| Self::Unknown(line.trim().to_string())),
            },
            "/performance" | "/perf" => Self::Performance,
            "/explain" if !arg.is_empty() => Self::Explain(arg.to_string()),
            "/advisors" => Self::Advisors,
            _ => Self::Unknown(line.trim().to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    coordinator: Arc<Coordinator>,
    repl: ReplConfig,
    output: OutputConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self {
            coordinator,
            repl: ReplConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    pub fn with_output_config(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.repl.show_progress = show;
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.repl.history_file else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(self.repl.history_size, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open REPL history {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("council".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)) {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                    continue;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Advisor Council - Chat Mode        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Advisors: {}", self.coordinator.advisor_ids().join(", "));
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /history [n]      - Show recent deliberations");
        println!("  /performance      - Show how often each advisor agreed");
        println!("  /explain <topic>  - Explain a past deliberation");
        println!("  /advisors         - Show registered advisors");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::History(limit) => {
                print!(
                    "{}",
                    ConsoleFormatter::format_history(&self.coordinator.history(limit))
                );
            }
            ReplCommand::Performance => {
                print!(
                    "{}",
                    ConsoleFormatter::format_performance(&self.coordinator.advisor_performance())
                );
            }
            ReplCommand::Explain(topic) => {
                let explanation = self.coordinator.explain(&topic);
                print!(
                    "{}",
                    ConsoleFormatter::format_explanation(explanation.as_ref(), &topic)
                );
            }
            ReplCommand::Advisors => {
                print!(
                    "{}",
                    ConsoleFormatter::format_advisors(&self.coordinator.advisors())
                );
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&self, question: &str) {
        println!();

        let input = DeliberateInput::new(question);
        let result = if self.repl.show_progress {
            let progress = ProgressReporter::new();
            self.coordinator
                .deliberate_with_progress(input, &progress)
                .await
        } else {
            self.coordinator.deliberate(input).await
        };

        match result {
            Ok(record) => {
                println!("{}", ConsoleFormatter::render(&record, self.output.format));
                println!("{} {}", "topic:".dimmed(), record.topic);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}
