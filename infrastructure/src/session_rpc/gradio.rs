//! HTTP client for Gradio-style queue APIs.
//!
//! ```text
//! GET  {base}/config                              -> {"api_prefix": "/gradio_api", ...}
//! POST {base}{prefix}/call/{name}  {"data": [..]} -> {"event_id": "..."}
//! GET  {base}{prefix}/call/{name}/{event_id}      -> text/event-stream
//!        event: complete\ndata: [...]
//!        event: error\ndata: "message"
//! ```

use super::client::{RemoteProcedureConnector, RemoteProcedureSession, RpcCallError};
use async_trait::async_trait;
use eventsource_stream::{EventStreamError, Eventsource};
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::{Value, json};
use std::pin::pin;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_API_PREFIX: &str = "/gradio_api";

/// Connects to a Gradio app by URL or by hosted space id.
pub struct GradioConnector {
    client: reqwest::Client,
    base_url: String,
}

impl GradioConnector {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Connector for a hosted space id such as `owner/name`.
    pub fn for_space(space: &str, timeout: Duration) -> reqwest::Result<Self> {
        Self::new(space_url(space), timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Public URL of a hosted space: `Owner/My_App` becomes `https://owner-my-app.hf.space`.
pub fn space_url(space: &str) -> String {
    let host: String = space
        .trim()
        .trim_matches('/')
        .chars()
        .map(|c| match c {
            '/' | '_' | '.' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    format!("https://{}.hf.space", host)
}

#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    #[serde(default)]
    api_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallAccepted {
    event_id: String,
}

fn map_send_error(e: reqwest::Error) -> RpcCallError {
    if e.is_timeout() {
        RpcCallError::Timeout
    } else {
        RpcCallError::Connect(e.to_string())
    }
}

#[async_trait]
impl RemoteProcedureConnector for GradioConnector {
    async fn connect(&self) -> Result<Box<dyn RemoteProcedureSession>, RpcCallError> {
        let url = format!("{}/config", self.base_url);
        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcCallError::Status {
                status: status.as_u16(),
            });
        }
        let config: AppConfig = response
            .json()
            .await
            .map_err(|e| RpcCallError::Protocol(format!("Invalid app config: {}", e)))?;

        let prefix = config
            .api_prefix
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        info!("Connected to {} (api prefix {})", self.base_url, prefix);

        Ok(Box::new(GradioSession {
            client: self.client.clone(),
            api_base: format!("{}/{}", self.base_url, prefix.trim_matches('/'))
                .trim_end_matches('/')
                .to_string(),
        }))
    }
}

/// One connected Gradio app.
pub struct GradioSession {
    client: reqwest::Client,
    api_base: String,
}

impl GradioSession {
    fn call_url(&self, procedure: &str) -> String {
        format!("{}/call/{}", self.api_base, procedure.trim_start_matches('/'))
    }
}

#[async_trait]
impl RemoteProcedureSession for GradioSession {
    async fn call(&self, procedure: &str, args: &[(&str, Value)]) -> Result<Value, RpcCallError> {
        let url = self.call_url(procedure);
        let data: Vec<Value> = args.iter().map(|(_, v)| v.clone()).collect();
        debug!("POST {} ({} args)", url, data.len());

        let response = self
            .client
            .post(&url)
            .json(&json!({ "data": data }))
            .send()
            .await
            .map_err(map_send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcCallError::Status {
                status: status.as_u16(),
            });
        }
        let accepted: CallAccepted = response
            .json()
            .await
            .map_err(|e| RpcCallError::Protocol(format!("Missing event id: {}", e)))?;

        let stream_url = format!("{}/{}", url, accepted.event_id);
        let response = self
            .client
            .get(&stream_url)
            .send()
            .await
            .map_err(map_send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcCallError::Status {
                status: status.as_u16(),
            });
        }
        read_outcome(procedure, response.bytes_stream()).await
    }
}

const REMOTE_ERROR: &str = "remote procedure raised an error";

/// Read an event stream until the call completes or fails.
///
/// Events other than `complete` and `error` (heartbeats, progress) are skipped.
pub(crate) async fn read_outcome<S, B, E>(procedure: &str, body: S) -> Result<Value, RpcCallError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut events = pin!(body.eventsource());
    while let Some(event) = events.next().await {
        let event = event.map_err(|e| match e {
            EventStreamError::Transport(e) => RpcCallError::Connect(e.to_string()),
            other => RpcCallError::Protocol(format!("Malformed event stream: {}", other)),
        })?;
        match event.event.as_str() {
            "complete" => {
                return serde_json::from_str(&event.data).map_err(|e| {
                    RpcCallError::Protocol(format!("Invalid result payload: {}", e))
                });
            }
            "error" => {
                let data = event.data.trim();
                let message = match serde_json::from_str::<Value>(data) {
                    Ok(Value::String(s)) => s,
                    Ok(Value::Null) => REMOTE_ERROR.to_string(),
                    _ if data.is_empty() => REMOTE_ERROR.to_string(),
                    _ => data.to_string(),
                };
                return Err(RpcCallError::Remote {
                    procedure: procedure.to_string(),
                    message,
                });
            }
            other => debug!("Skipping '{}' event for {}", other, procedure),
        }
    }
    Err(RpcCallError::Protocol(format!(
        "Event stream for {} ended without a result",
        procedure
    )))
}
