//! [`SessionRpcAdapter`]: stateful remote-session chat backend.

use super::client::{RemoteProcedureConnector, RemoteProcedureSession, RpcCallError};
use async_trait::async_trait;
use chatline_application::config::session_config::DEFAULT_FALLBACK_REPLY;
use chatline_application::{AdapterError, BackendAdapter};
use chatline_domain::util::preview;
use chatline_domain::{PairedHistory, Turn};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Greeting shown when the remote session is reachable but has no greeting
pub const DEFAULT_RPC_GREETING: &str = "Hi! I'm your chat assistant. Ask me anything!";

/// Greeting shown when the remote session cannot be reached at startup
pub const DEFAULT_CONNECT_WARNING: &str =
    "Warning: Could not connect to AI service. Please check your connection.";

/// Settings for [`SessionRpcAdapter`]
#[derive(Debug, Clone)]
pub struct SessionRpcConfig {
    /// Procedure that answers a message
    pub submit_procedure: String,
    /// Zero-argument procedure returning the opening greeting, if any
    pub greeting_procedure: Option<String>,
    pub fallback_reply: String,
    pub fallback_greeting: String,
    pub connect_warning: String,
}

impl Default for SessionRpcConfig {
    fn default() -> Self {
        Self {
            submit_procedure: "/user_submit".to_string(),
            greeting_procedure: Some("/lambda".to_string()),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            fallback_greeting: DEFAULT_RPC_GREETING.to_string(),
            connect_warning: DEFAULT_CONNECT_WARNING.to_string(),
        }
    }
}

#[derive(Default)]
struct RpcState {
    session: Option<Box<dyn RemoteProcedureSession>>,
    history: PairedHistory,
}

/// Talks to a remote session that keeps paired-turn history.
///
/// The session is opened lazily on first use. Failed connects leave the
/// adapter unconnected so the next call tries again. A failed call drops
/// the open history pair, so the pairing never accumulates orphans.
pub struct SessionRpcAdapter {
    connector: Arc<dyn RemoteProcedureConnector>,
    config: SessionRpcConfig,
    state: Mutex<RpcState>,
}

impl SessionRpcAdapter {
    pub fn new(connector: Arc<dyn RemoteProcedureConnector>, config: SessionRpcConfig) -> Self {
        Self {
            connector,
            config,
            state: Mutex::new(RpcState::default()),
        }
    }

    /// Snapshot of the paired-turn history.
    pub async fn paired_history(&self) -> PairedHistory {
        self.state.lock().await.history.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.session.is_some()
    }
}

async fn ensure_session<'a>(
    connector: &dyn RemoteProcedureConnector,
    slot: &'a mut Option<Box<dyn RemoteProcedureSession>>,
) -> Result<&'a dyn RemoteProcedureSession, RpcCallError> {
    if slot.is_none() {
        info!("Connecting to remote session");
        *slot = Some(connector.connect().await?);
    }
    match slot {
        Some(session) => Ok(&**session),
        None => Err(RpcCallError::Connect("session unavailable".to_string())),
    }
}

/// Reply is the second element of the last pair in the returned history:
/// `[_, [[user, reply], ...]]`.
pub(crate) fn extract_reply(value: &Value) -> Option<String> {
    value
        .get(1)?
        .as_array()?
        .last()?
        .get(1)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Greeting is the second field of the first element: `[[_, greeting], ...]`.
pub(crate) fn extract_greeting(value: &Value) -> Option<String> {
    value
        .get(0)?
        .get(1)?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl BackendAdapter for SessionRpcAdapter {
    fn name(&self) -> &str {
        "session_rpc"
    }

    async fn send_turn(&self, user_text: &str, _history: &[Turn]) -> Result<String, AdapterError> {
        let mut guard = self.state.lock().await;
        let RpcState { session, history } = &mut *guard;

        let handle = match ensure_session(self.connector.as_ref(), session).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Remote session unavailable: {}", e);
                *session = None;
                return Err(e.to_adapter_error());
            }
        };

        history.begin(user_text);
        let args = [
            ("user_message", Value::String(user_text.to_string())),
            ("chat_history", history.to_wire()),
        ];
        debug!(
            "Calling {} ({} pairs)",
            self.config.submit_procedure,
            history.len()
        );
        let result = handle.call(&self.config.submit_procedure, &args).await;

        match result {
            Ok(value) => {
                let reply = extract_reply(&value).unwrap_or_else(|| {
                    warn!(
                        "No reply in result of {}: {}",
                        self.config.submit_procedure,
                        preview(&value.to_string(), 200)
                    );
                    self.config.fallback_reply.clone()
                });
                history.complete(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                warn!("{} failed: {}", self.config.submit_procedure, e);
                history.abandon();
                if e.invalidates_session() {
                    *session = None;
                }
                Err(e.to_adapter_error())
            }
        }
    }

    async fn greeting(&self) -> Option<String> {
        let mut guard = self.state.lock().await;
        let RpcState { session, .. } = &mut *guard;

        let handle = match ensure_session(self.connector.as_ref(), session).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Could not connect for greeting: {}", e);
                *session = None;
                return Some(self.config.connect_warning.clone());
            }
        };

        let Some(procedure) = self.config.greeting_procedure.as_deref() else {
            return Some(self.config.fallback_greeting.clone());
        };

        let result = handle.call(procedure, &[]).await;
        match result {
            Ok(value) => Some(
                extract_greeting(&value).unwrap_or_else(|| self.config.fallback_greeting.clone()),
            ),
            Err(e) => {
                warn!("Greeting procedure {} failed: {}", procedure, e);
                if e.invalidates_session() {
                    *session = None;
                }
                Some(self.config.fallback_greeting.clone())
            }
        }
    }

    async fn reset(&self) {
        self.state.lock().await.history = PairedHistory::new();
    }
}
