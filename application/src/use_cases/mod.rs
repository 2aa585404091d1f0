//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod failure_messages;
pub mod session_controller;
