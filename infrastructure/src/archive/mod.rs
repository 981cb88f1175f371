//! Decision archive
//!
//! Completed rounds are appended to a JSONL file and searched again when a
//! later question resembles an earlier one.

mod jsonl_archive;

pub use jsonl_archive::{ArchivedDecision, JsonlDecisionArchive};
