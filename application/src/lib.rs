//! Application layer for chatline
//!
//! This crate contains the session controller use case, port definitions,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    backend_adapter::{AdapterError, BackendAdapter},
    markup_renderer::{MarkupRenderer, PlainTextRenderer},
    presentation_sink::{NoPresentation, PresentationSink},
};
pub use use_cases::failure_messages::FailureMessages;
pub use use_cases::session_controller::{
    PendingTurn, SessionController, SubmitOutcome, SubmitRejection,
};
