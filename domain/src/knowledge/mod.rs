//! Knowledge log domain types
//!
//! The knowledge log is an append-only, topic-partitioned store of facts
//! shared by every advisor in a round. This module holds the value types and
//! pure ranking/statistics logic; the concurrent store itself lives in the
//! application layer.

pub mod entry;
pub mod query;
pub mod search;
pub mod stats;

pub use entry::{Entry, EntryId, EntryKind, NewEntry, clamp_unit};
pub use query::{DEFAULT_READ_LIMIT, EntryFilter};
pub use search::Relevance;
pub use stats::TopicStatistics;
