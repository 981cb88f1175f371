//! Configuration file loading for advisor-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables: `COUNCIL_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAdvisorsConfig, FileArchiveConfig, FileConfig, FileCouncilConfig, FileCustomAdvisor,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig, FileWeightingConfig,
};
pub use loader::{ConfigLoader, ConfigSources};
