//! Presentation layer for chatline
//!
//! This crate contains CLI definitions, console output,
//! the waiting indicator, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{BackendChoice, Cli};
pub use config::OutputConfig;
pub use output::console::{ConsoleFormatter, ConsoleSink};
pub use progress::indicator::WaitingIndicator;
