//! Infrastructure layer for chatline
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod backend;
pub mod config;
pub mod direct;
pub mod local;
pub mod markup;
pub mod session_rpc;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use backend::{BackendBuildError, ProbeError, build_backend, probe_backend};
pub use config::{
    BackendKind, ConfigIssue, ConfigIssueCode, ConfigLoader, ENV_PREFIX, FileBackendConfig, FileConfig,
    FileDirectConfig, FileLocalConfig, FileOutputConfig, FileSessionConfig, FileSessionRpcConfig,
    MarkupKind, Severity,
};
pub use direct::{DirectReplyAdapter, DirectReplyConfig, HealthReport};
pub use local::{LocalReplyAdapter, LocalReplyConfig};
pub use markup::{HtmlEscapeRenderer, MarkdownHtmlRenderer, TerminalMarkdownRenderer, renderer_for};
pub use session_rpc::{
    GradioConnector, RemoteProcedureConnector, RemoteProcedureSession, RpcCallError,
    SessionRpcAdapter, SessionRpcConfig,
};
