//! Output formatting for deliberation results

pub mod console;
pub mod formatter;

pub use formatter::OutputFormatter;
