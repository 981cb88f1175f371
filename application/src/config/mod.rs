//! Application-level configuration.
//!
//! - [`CouncilConfig`]: everything the coordinator needs for a round
//! - [`WeightTuning`]: how advisor weights are derived from opinions

pub mod council_config;

pub use council_config::{CouncilConfig, WeightTuning};
