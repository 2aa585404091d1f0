//! Session RPC backend.
//!
//! Connects once to a remote session and invokes named procedures on it.
//! The remote side keeps its own `(user, reply)` pairing of the conversation,
//! so the adapter maintains a [`PairedHistory`](chatline_domain::PairedHistory)
//! alongside the controller's transcript.
//!
//! - [`client`] — the connector/session traits and [`RpcCallError`]
//! - [`adapter::SessionRpcAdapter`] — the [`BackendAdapter`](chatline_application::BackendAdapter) implementation
//! - [`gradio::GradioConnector`] — HTTP client for Gradio-style queue APIs

pub mod adapter;
pub mod client;
pub mod gradio;

pub use adapter::{SessionRpcAdapter, SessionRpcConfig};
pub use client::{RemoteProcedureConnector, RemoteProcedureSession, RpcCallError};
pub use gradio::GradioConnector;
