//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::AggregationMethod;
use serde_json::Value;
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Decision, every opinion and the round statistics
    Full,
    /// Only the decision
    Decision,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Decision => council_domain::OutputFormat::Decision,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for council
#[derive(Parser, Debug)]
#[command(name = "council")]
#[command(author, version, about = "Advisor Council - Independent advisors deliberate and reach a decision")]
#[command(long_about = r#"
Advisor Council asks a panel of advisors for their opinion on a question and
reduces those opinions to one decision with a confidence and agreement level.

Each round:
1. Selection: the core advisors plus any whose expertise matches the question
2. Analysis: every selected advisor analyzes the question in parallel
3. Aggregation: opinions are weighted and reduced to a single decision

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/council/config.toml   Global config

Example:
  council "Should we migrate the billing service to Postgres?"
  council --context budget=50000 --method supermajority "Launch the beta next month?"
  council --advisor risk --advisor finance -o full "Sign the vendor contract?"
  council --chat
"#)]
pub struct Cli {
    /// The question to ask the council (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Context entry as key=value (can be specified multiple times)
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_pair)]
    pub context: Vec<(String, Value)>,

    /// Advisors to consult instead of the automatic selection (can be specified multiple times)
    #[arg(short, long = "advisor", value_name = "ID")]
    pub advisors: Vec<String>,

    /// Aggregation method (weighted_majority, supermajority, unanimous, confidence_weighted, hybrid)
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<AggregationMethod>,

    /// Deadline for the round in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub deadline: Option<f64>,

    /// Knowledge log topic for the round
    #[arg(short, long, value_name = "TOPIC")]
    pub topic: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print the narrative of the round after the result
    #[arg(long)]
    pub explain: bool,

    /// Consult every registered advisor instead of the core set
    #[arg(long)]
    pub full: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

/// Parse `key=value`. The value is read as JSON when it parses, else kept as a string.
pub fn parse_context_pair(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in {:?}", raw));
    }
    let value = value.trim();
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
