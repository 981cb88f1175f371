//! Advisor selection mode

use serde::{Deserialize, Serialize};

/// Which advisors take part when a round does not name them explicitly
///
/// - `Core`: the configured core set plus any advisor whose expertise overlaps the question
/// - `Full`: every registered advisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Core,
    Full,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Core => "core",
            SelectionMode::Full => "full",
        }
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "core" | "core_only" | "core-only" => Ok(SelectionMode::Core),
            "full" | "all" => Ok(SelectionMode::Full),
            other => Err(format!("Unknown selection mode: {}. Valid: core, full", other)),
        }
    }
}
