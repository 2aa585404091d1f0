//! Chat session domain.
//!
//! - [`entities::Turn`] — a single message within a session
//! - [`transcript::Transcript`] — the append-only log of turns
//! - [`paired_history::PairedHistory`] — backend-side `(user, reply)` pairing
//! - [`state::ControllerState`] — turn-taking state machine states

pub mod entities;
pub mod paired_history;
pub mod state;
pub mod transcript;
