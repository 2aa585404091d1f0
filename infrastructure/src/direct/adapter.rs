//! [`DirectReplyAdapter`]: stateless HTTP chat backend.

use super::wire::{ChatRequest, ChatResponse, ErrorBody, HealthReport};
use async_trait::async_trait;
use chatline_application::config::session_config::DEFAULT_FALLBACK_REPLY;
use chatline_application::{AdapterError, BackendAdapter};
use chatline_domain::{FailureCategory, Turn};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Settings for [`DirectReplyAdapter`]
#[derive(Debug, Clone)]
pub struct DirectReplyConfig {
    /// Scheme, host and port of the backend, e.g. `http://127.0.0.1:5000`
    pub base_url: String,
    /// Chat endpoint path
    pub endpoint: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Reply used when a successful response has no usable `reply`
    pub fallback_reply: String,
}

impl Default for DirectReplyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            endpoint: "/api/chat".to_string(),
            timeout: Duration::from_secs(60),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

/// Posts each turn with its full history to a request/reply endpoint.
///
/// Holds no conversation state between calls. Failures are never retried.
pub struct DirectReplyAdapter {
    client: reqwest::Client,
    base_url: String,
    chat_url: String,
    fallback_reply: String,
}

impl DirectReplyAdapter {
    pub fn new(config: DirectReplyConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let chat_url = join_url(&base_url, &config.endpoint);
        info!("Direct reply backend at {}", chat_url);
        Ok(Self {
            client,
            base_url,
            chat_url,
            fallback_reply: config.fallback_reply,
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    /// Query the backend's `/health` endpoint.
    pub async fn health(&self) -> Result<HealthReport, AdapterError> {
        let url = join_url(&self.base_url, "/health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_send_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify_send_error)?;
        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }
        serde_json::from_slice(&body)
            .map_err(|e| AdapterError::Unknown(format!("Invalid health response: {}", e)))
    }
}

#[async_trait]
impl BackendAdapter for DirectReplyAdapter {
    fn name(&self) -> &str {
        "direct"
    }

    async fn send_turn(&self, user_text: &str, history: &[Turn]) -> Result<String, AdapterError> {
        debug!(
            "POST {} ({} prior turns)",
            self.chat_url,
            history.len()
        );

        let response = self
            .client
            .post(&self.chat_url)
            .json(&ChatRequest {
                message: user_text,
                history,
            })
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        // A body that cannot be read after a 2xx is treated like an empty one
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                warn!("Could not read response body: {}", e);
                Vec::new()
            }
        };

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        Ok(decode_reply(&body, &self.fallback_reply))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Extract the reply from a successful body, falling back when it is
/// missing, empty, or not valid JSON.
pub(crate) fn decode_reply(body: &[u8], fallback: &str) -> String {
    let parsed: ChatResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Undecodable reply body ({} bytes): {}", body.len(), e);
            ChatResponse::default()
        }
    };
    match parsed.reply {
        Some(reply) if !reply.is_empty() => reply,
        _ => fallback.to_string(),
    }
}

/// Map a non-success status and its body to an [`AdapterError`].
pub(crate) fn classify_failure(status: StatusCode, body: &[u8]) -> AdapterError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail());
    match FailureCategory::from_status(status.as_u16()) {
        Some(category) => AdapterError::Transport { category, detail },
        None => AdapterError::Unknown(match detail {
            Some(d) => format!("HTTP {}: {}", status.as_u16(), d),
            None => format!("HTTP {}", status.as_u16()),
        }),
    }
}

fn classify_send_error(e: reqwest::Error) -> AdapterError {
    if e.is_timeout() {
        AdapterError::transport_with_detail(FailureCategory::Timeout, e.to_string())
    } else if e.is_connect() {
        AdapterError::Connection(e.to_string())
    } else {
        AdapterError::Unknown(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dead_url, serve};
    use axum::http::StatusCode as HttpStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn adapter(base_url: String) -> DirectReplyAdapter {
        DirectReplyAdapter::new(DirectReplyConfig {
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    // -- Pure helpers -------------------------------------------------------------

    #[test]
    fn decode_reply_present() {
        assert_eq!(decode_reply(br#"{"reply": "Hi there"}"#, "fb"), "Hi there");
    }

    #[test]
    fn decode_reply_missing_or_empty_uses_fallback() {
        assert_eq!(decode_reply(br#"{}"#, "fb"), "fb");
        assert_eq!(decode_reply(br#"{"reply": ""}"#, "fb"), "fb");
        assert_eq!(decode_reply(br#"{"reply": null}"#, "fb"), "fb");
    }

    #[test]
    fn decode_reply_garbage_uses_fallback() {
        assert_eq!(decode_reply(b"<html>oops</html>", "fb"), "fb");
        assert_eq!(decode_reply(b"", "fb"), "fb");
    }

    #[test]
    fn classify_payment_required() {
        let error = classify_failure(HttpStatus::PAYMENT_REQUIRED, br#"{"error": "no credit"}"#);
        assert_eq!(
            error,
            AdapterError::transport_with_detail(FailureCategory::Quota, "no credit")
        );
    }

    #[test]
    fn classify_uncategorized_status() {
        let error = classify_failure(HttpStatus::NOT_FOUND, b"");
        assert_eq!(error, AdapterError::Unknown("HTTP 404".to_string()));
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://h/", "/api/chat"), "http://h/api/chat");
        assert_eq!(join_url("http://h", "api/chat"), "http://h/api/chat");
    }

    // -- Against a local server ---------------------------------------------------

    #[tokio::test]
    async fn sends_message_and_history() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let app = Router::new().route(
            "/api/chat",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!({"reply": "Hi there"}))
                }
            }),
        );
        let adapter = adapter(serve(app).await);

        let history = vec![Turn::user("earlier"), Turn::assistant("sure")];
        let reply = adapter.send_turn("hello", &history).await.unwrap();

        assert_eq!(reply, "Hi there");
        assert_eq!(
            seen.lock().unwrap().clone().unwrap(),
            json!({
                "message": "hello",
                "history": [
                    {"role": "user", "content": "earlier"},
                    {"role": "assistant", "content": "sure"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn quota_status_is_transport_error() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    HttpStatus::PAYMENT_REQUIRED,
                    Json(json!({"error": "Billing required"})),
                )
            }),
        );
        let adapter = adapter(serve(app).await);

        let error = adapter.send_turn("x", &[]).await.unwrap_err();
        assert_eq!(error.category(), Some(FailureCategory::Quota));
    }

    #[tokio::test]
    async fn malformed_success_yields_fallback() {
        let app = Router::new().route("/api/chat", post(|| async { "definitely not json" }));
        let adapter = adapter(serve(app).await);

        let reply = adapter.send_turn("x", &[]).await.unwrap();
        assert_eq!(reply, DEFAULT_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn unreachable_backend_is_connection_error() {
        let adapter = adapter(dead_url().await);

        let error = adapter.send_turn("x", &[]).await.unwrap_err();
        assert!(matches!(error, AdapterError::Connection(_)));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"reply": "late"}))
            }),
        );
        let adapter = DirectReplyAdapter::new(DirectReplyConfig {
            base_url: serve(app).await,
            timeout: Duration::from_millis(200),
            ..Default::default()
        })
        .unwrap();

        let error = adapter.send_turn("x", &[]).await.unwrap_err();
        assert_eq!(error.category(), Some(FailureCategory::Timeout));
    }

    #[tokio::test]
    async fn usable_again_after_failure() {
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();
        let app = Router::new().route(
            "/api/chat",
            post(move || {
                let counter = counter.clone();
                async move {
                    let mut n = counter.lock().unwrap();
                    *n += 1;
                    if *n == 1 {
                        (HttpStatus::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})))
                    } else {
                        (HttpStatus::OK, Json(json!({"reply": "recovered"})))
                    }
                }
            }),
        );
        let adapter = adapter(serve(app).await);

        let first = adapter.send_turn("x", &[]).await.unwrap_err();
        assert_eq!(first.category(), Some(FailureCategory::Server));
        assert_eq!(adapter.send_turn("x", &[]).await.unwrap(), "recovered");
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn health_report() {
        let app = Router::new().route(
            "/health",
            get(|| async { Json(json!({"ok": true, "model": "m", "key": "sk-or-v1..."})) }),
        );
        let adapter = adapter(serve(app).await);

        let report = adapter.health().await.unwrap();
        assert!(report.ok);
        assert_eq!(report.model.as_deref(), Some("m"));
    }
}
