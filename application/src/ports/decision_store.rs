//! Decision store port
//!
//! Completed rounds are handed to the store after they are recorded in
//! memory. Persistence is fire-and-forget: failures are logged by the
//! coordinator and never reach the caller.

use async_trait::async_trait;
use council_domain::DeliberationRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait DecisionStore: Send + Sync {
    async fn persist(&self, record: &DeliberationRecord) -> Result<(), StoreError>;
}

/// Store that discards every record
pub struct NoDecisionStore;

#[async_trait]
impl DecisionStore for NoDecisionStore {
    async fn persist(&self, _record: &DeliberationRecord) -> Result<(), StoreError> {
        Ok(())
    }
}
