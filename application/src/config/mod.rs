//! Application-level configuration.
//!
//! - [`SessionConfig`] — input limits and fixed texts used by the session controller

pub mod session_config;

pub use session_config::SessionConfig;
