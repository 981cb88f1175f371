//! Use cases

pub mod coordinator;
