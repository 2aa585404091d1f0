//! Domain layer for chatline
//!
//! This crate contains the conversation entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! The [`Transcript`] is the ordered, append-only log of [`Turn`]s for one
//! chat session. Only the session controller writes to it.
//!
//! ## Paired history
//!
//! Some backends keep their own `(user, reply)` pairing of the conversation.
//! [`PairedHistory`] models that structure and guarantees that at most one
//! pair is waiting for its reply.

pub mod core;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{
    error::InputRejection,
    failure::FailureCategory,
    input::{DEFAULT_MAX_CHARS, InputPolicy},
};
pub use session::{
    entities::{Role, Turn},
    paired_history::{PairedHistory, TurnPair},
    state::{ControllerState, IndicatorState},
    transcript::Transcript,
};
