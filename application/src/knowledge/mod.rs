//! Shared knowledge log
//!
//! The only mutable resource shared by concurrently running advisors.

mod log;

pub use log::{DEFAULT_SUBSCRIBER_CAPACITY, KnowledgeLog, Subscription, SubscriptionId};
