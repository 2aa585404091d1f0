//! Local canned-reply backend.
//!
//! Answers from a fixed table without any server, after a short pause so
//! the waiting indicator is visible. Useful offline and for demos.
//!
//! - [`adapter::LocalReplyAdapter`] — the [`BackendAdapter`](chatline_application::BackendAdapter) implementation

pub mod adapter;

pub use adapter::{
    DEFAULT_LOCAL_DELAY_MS, DEFAULT_UNKNOWN_REPLY, LocalReplyAdapter, LocalReplyConfig,
    default_replies,
};
