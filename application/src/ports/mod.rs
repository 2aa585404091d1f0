//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters must implement.

pub mod backend_adapter;
pub mod markup_renderer;
pub mod presentation_sink;
