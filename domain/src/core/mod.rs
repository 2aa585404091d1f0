//! Core domain concepts shared across the session subdomain.
//!
//! - [`input::InputPolicy`] — which user input may be submitted
//! - [`failure::FailureCategory`] — classification of backend failures
//! - [`error::InputRejection`] — why a submission was refused

pub mod error;
pub mod failure;
pub mod input;
