//! Output format value object

use serde::{Deserialize, Serialize};

/// How a deliberation result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Decision plus every opinion and the round statistics
    Full,
    /// Only the decision (default)
    #[default]
    Decision,
    /// JSON output
    Json,
}
