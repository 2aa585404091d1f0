//! Direct reply backend.
//!
//! Stateless HTTP request/response: every turn posts the new message along
//! with the full prior history and reads back a single `reply` field.
//!
//! - [`adapter::DirectReplyAdapter`] — the [`BackendAdapter`](chatline_application::BackendAdapter) implementation
//! - [`wire`] — request and response bodies

pub mod adapter;
pub mod wire;

pub use adapter::{DirectReplyAdapter, DirectReplyConfig};
pub use wire::HealthReport;
