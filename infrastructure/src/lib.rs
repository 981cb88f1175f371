//! Infrastructure layer for advisor-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod archive;
pub mod config;

// Re-export commonly used types
pub use archive::{ArchivedDecision, JsonlDecisionArchive};
pub use config::{
    ConfigLoader, ConfigSources, FileAdvisorsConfig, FileArchiveConfig, FileConfig,
    FileCouncilConfig, FileCustomAdvisor, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileReplConfig, FileWeightingConfig,
};
