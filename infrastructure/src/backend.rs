//! Builds the configured [`BackendAdapter`].

use crate::config::{BackendKind, ConfigIssue, FileConfig};
use crate::direct::{DirectReplyAdapter, DirectReplyConfig};
use crate::local::{LocalReplyAdapter, LocalReplyConfig};
use crate::session_rpc::{
    GradioConnector, RemoteProcedureConnector, SessionRpcAdapter, SessionRpcConfig,
};
use chatline_application::{AdapterError, BackendAdapter};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that prevent a backend from being built
#[derive(Error, Debug)]
pub enum BackendBuildError {
    #[error("Invalid configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ConfigIssue>),

    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Build the backend selected by `config.backend.kind`.
///
/// Error-severity issues in the selected backend's section abort the build;
/// warnings have already been reported by [`FileConfig::validate`].
pub fn build_backend(config: &FileConfig) -> Result<Arc<dyn BackendAdapter>, BackendBuildError> {
    let (kind, _) = config.backend.parse_kind();
    let fallback_reply = config.session.to_session_config().0.fallback_reply;

    match kind {
        BackendKind::Direct => {
            let adapter = build_direct(config)?;
            Ok(Arc::new(adapter))
        }
        BackendKind::SessionRpc => {
            let file = &config.backend.session_rpc;
            let connector = build_connector(config)?;
            info!(
                "Session RPC backend at {} (submit {})",
                connector.base_url(),
                file.submit_procedure
            );
            let adapter = SessionRpcAdapter::new(
                Arc::new(connector),
                SessionRpcConfig {
                    submit_procedure: file.submit_procedure.trim().to_string(),
                    greeting_procedure: file.greeting_procedure(),
                    fallback_reply,
                    fallback_greeting: file.greeting.clone(),
                    connect_warning: file.connect_warning.clone(),
                },
            );
            Ok(Arc::new(adapter))
        }
        BackendKind::Local => Ok(Arc::new(build_local(config)?)),
    }
}

fn join_messages(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn fatal_issues(issues: Vec<ConfigIssue>) -> Result<(), BackendBuildError> {
    let errors: Vec<ConfigIssue> = issues.into_iter().filter(ConfigIssue::is_error).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(BackendBuildError::InvalidConfig(errors))
    }
}

fn build_direct(config: &FileConfig) -> Result<DirectReplyAdapter, BackendBuildError> {
    let file = &config.backend.direct;
    fatal_issues(file.validate())?;
    let adapter = DirectReplyAdapter::new(DirectReplyConfig {
        base_url: file.base_url.trim().to_string(),
        endpoint: file.endpoint.clone(),
        timeout: file.timeout(),
        fallback_reply: config.session.to_session_config().0.fallback_reply,
    })?;
    Ok(adapter)
}

fn build_local(config: &FileConfig) -> Result<LocalReplyAdapter, BackendBuildError> {
    let file = &config.backend.local;
    fatal_issues(file.validate())?;
    let adapter = LocalReplyAdapter::new(LocalReplyConfig {
        delay: file.delay(),
        unknown_reply: file.unknown_reply.clone(),
        replies: file.replies.clone(),
    });
    info!("Local backend ({} canned replies)", adapter.reply_count());
    Ok(adapter)
}

fn build_connector(config: &FileConfig) -> Result<GradioConnector, BackendBuildError> {
    let file = &config.backend.session_rpc;
    fatal_issues(file.validate())?;
    let connector = match (file.base_url(), file.space()) {
        (Some(url), _) => GradioConnector::new(url, file.timeout())?,
        (None, Some(space)) => GradioConnector::for_space(space, file.timeout())?,
        (None, None) => {
            return Err(BackendBuildError::InvalidConfig(file.validate()));
        }
    };
    Ok(connector)
}

/// Check that the configured backend is reachable, without sending a turn.
///
/// Returns a one-line description of what answered.
pub async fn probe_backend(config: &FileConfig) -> Result<String, ProbeError> {
    let (kind, _) = config.backend.parse_kind();
    match kind {
        BackendKind::Direct => {
            let adapter = build_direct(config)?;
            let report = adapter.health().await?;
            Ok(format!(
                "{}: ok={} model={}",
                adapter.chat_url(),
                report.ok,
                report.model.as_deref().unwrap_or("unknown")
            ))
        }
        BackendKind::SessionRpc => {
            let connector = build_connector(config)?;
            connector
                .connect()
                .await
                .map_err(|e| ProbeError::Unreachable(e.to_adapter_error()))?;
            Ok(format!("{}: connected", connector.base_url()))
        }
        BackendKind::Local => {
            let adapter = build_local(config)?;
            Ok(format!("local: {} canned replies", adapter.reply_count()))
        }
    }
}

/// Why [`probe_backend`] failed
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error(transparent)]
    Build(#[from] BackendBuildError),

    #[error("Backend unreachable: {0}")]
    Unreachable(#[from] AdapterError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dead_url, serve};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[test]
    fn test_default_builds_direct() {
        let adapter = build_backend(&FileConfig::default()).unwrap();
        assert_eq!(adapter.name(), "direct");
    }

    #[test]
    fn test_session_rpc_selected() {
        let mut config = FileConfig::default();
        config.backend.kind = "session_rpc".to_string();
        let adapter = build_backend(&config).unwrap();
        assert_eq!(adapter.name(), "session_rpc");
    }

    #[tokio::test]
    async fn test_local_selected() {
        let mut config = FileConfig::default();
        config.backend.kind = "local".to_string();
        config.backend.local.delay_ms = 0;
        let adapter = build_backend(&config).unwrap();
        assert_eq!(adapter.name(), "local");
        assert_eq!(
            adapter.send_turn("HELLO", &[]).await.unwrap(),
            "Hello! How can I assist you?"
        );
        assert!(probe_backend(&config).await.unwrap().starts_with("local:"));
    }

    #[tokio::test]
    async fn test_session_rpc_greetings_from_config() {
        let mut config = FileConfig::default();
        config.backend.kind = "session_rpc".to_string();
        config.backend.session_rpc.base_url = Some(dead_url().await);
        config.backend.session_rpc.connect_warning = "Space is asleep.".to_string();

        let adapter = build_backend(&config).unwrap();
        assert_eq!(adapter.greeting().await.as_deref(), Some("Space is asleep."));
    }

    #[test]
    fn test_empty_base_url_is_fatal() {
        let mut config = FileConfig::default();
        config.backend.direct.base_url = String::new();
        assert!(matches!(
            build_backend(&config),
            Err(BackendBuildError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_session_rpc_without_target_is_fatal() {
        let mut config = FileConfig::default();
        config.backend.kind = "session_rpc".to_string();
        config.backend.session_rpc.space = None;
        let error = build_backend(&config).err().unwrap();
        assert!(error.to_string().contains("backend.session_rpc.space"));
    }

    #[tokio::test]
    async fn test_probe_direct_health() {
        let app = Router::new().route(
            "/health",
            get(|| async { Json(json!({"ok": true, "model": "free-model"})) }),
        );
        let mut config = FileConfig::default();
        config.backend.direct.base_url = serve(app).await;

        let summary = probe_backend(&config).await.unwrap();
        assert!(summary.contains("model=free-model"));
    }

    #[tokio::test]
    async fn test_probe_unreachable_session_rpc() {
        let mut config = FileConfig::default();
        config.backend.kind = "session_rpc".to_string();
        config.backend.session_rpc.base_url = Some(dead_url().await);

        assert!(matches!(
            probe_backend(&config).await,
            Err(ProbeError::Unreachable(AdapterError::Connection(_)))
        ));
    }
}
