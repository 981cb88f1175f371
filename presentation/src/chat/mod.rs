//! Interactive chat module
//!
//! Provides a line-editor based interactive chat interface for the council.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
