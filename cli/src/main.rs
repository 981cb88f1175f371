//! CLI entrypoint for Advisor Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{Coordinator, DeliberateInput, KnowledgeLog};
use council_domain::{ConfigIssue, SelectionMode};
use council_infrastructure::{ConfigLoader, ConfigSources, FileConfig, JsonlDecisionArchive};
use council_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ProgressReporter, ReplConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so the log directory is known
    let sources = ConfigSources::discover(cli.config.as_deref());
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load_from(&sources).context("Failed to load configuration")?
    };

    let _log_guard = init_tracing(cli.verbose, &file_config);

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(&sources));
        println!("{}", ConfigLoader::render(&file_config)?);
        return Ok(());
    }

    report_issues(&file_config.validate())?;

    info!("Starting Advisor Council");

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let mut council_config = file_config.to_council_config();
    if cli.full {
        council_config = council_config.with_selection(SelectionMode::Full);
    }

    let log = Arc::new(KnowledgeLog::new());
    let mut coordinator = Coordinator::new(council_config, log);

    if file_config.archive.enabled {
        match file_config.archive.resolved_path() {
            Some(path) => match JsonlDecisionArchive::open(&path) {
                Ok(archive) => {
                    info!("Archiving decisions to {}", path.display());
                    let archive = Arc::new(archive);
                    coordinator = coordinator
                        .with_recall(archive.clone())
                        .with_store(archive);
                }
                Err(e) => warn!("Decision archive disabled: {}", e),
            },
            None => warn!("Decision archive disabled: no data directory"),
        }
    }

    let report = coordinator.initialize();
    info!("Registered advisors: {}", report.registered.join(", "));
    let coordinator = Arc::new(coordinator);

    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(file_config.output.format)
            .unwrap_or_default(),
        color: file_config.output.color,
    };

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: file_config.repl.show_progress && !cli.quiet,
            history_file: file_config.repl.history_file.clone(),
            history_size: file_config.repl.history_size,
        };
        let repl = ChatRepl::new(Arc::clone(&coordinator))
            .with_repl_config(repl_config)
            .with_output_config(output);

        repl.run().await?;
        coordinator.flush_persistence().await;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let mut input = DeliberateInput::new(question);
    for (key, value) in cli.context {
        input = input.with_context(key, value);
    }
    if let Some(topic) = cli.topic {
        input = input.with_topic(topic);
    }
    if !cli.advisors.is_empty() {
        input = input.with_advisors(cli.advisors);
    }
    if let Some(method) = cli.method {
        input = input.with_method(method);
    }
    if let Some(seconds) = cli.deadline {
        if !(seconds.is_finite() && seconds > 0.0) {
            bail!("--deadline must be a positive number of seconds");
        }
        input = input.with_deadline(Duration::from_secs_f64(seconds));
    }

    // Execute with or without progress reporting
    let record = if cli.quiet {
        coordinator.deliberate(input).await?
    } else {
        let progress = ProgressReporter::new();
        coordinator.deliberate_with_progress(input, &progress).await?
    };

    println!("{}", ConsoleFormatter::render(&record, output.format));

    if cli.explain {
        let explanation = coordinator.explain(&record.topic);
        print!(
            "{}",
            ConsoleFormatter::format_explanation(explanation.as_ref(), &record.topic)
        );
    }

    coordinator.flush_persistence().await;

    Ok(())
}

/// Initialize logging based on verbosity level, plus an optional log file
fn init_tracing(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match &config.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, &config.logging.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .init();

    guard
}

/// Log warnings, abort on errors
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    let mut errors = 0;
    for issue in issues {
        if issue.is_error() {
            error!("Config: {}", issue.message);
            errors += 1;
        } else {
            warn!("Config: {}", issue.message);
        }
    }
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}
