//! Backend configuration from TOML (`[backend]` section)

use crate::config::issue::{ConfigIssue, Severity};
use crate::local::{DEFAULT_LOCAL_DELAY_MS, DEFAULT_UNKNOWN_REPLY, default_replies};
use crate::session_rpc::adapter::{DEFAULT_CONNECT_WARNING, DEFAULT_RPC_GREETING};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which backend adapter to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Stateless request/reply endpoint
    #[default]
    Direct,
    /// Stateful remote session with paired history
    SessionRpc,
    /// Canned replies, no server needed
    Local,
}

impl BackendKind {
    pub const VALID_VALUES: [&'static str; 3] = ["direct", "session_rpc", "local"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Direct => "direct",
            BackendKind::SessionRpc => "session_rpc",
            BackendKind::Local => "local",
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    /// Accepts: "direct", "session_rpc", "session-rpc", "rpc", "local", "offline"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(BackendKind::Direct),
            "session_rpc" | "session-rpc" | "rpc" => Ok(BackendKind::SessionRpc),
            "local" | "offline" => Ok(BackendKind::Local),
            other => Err(format!("unknown backend kind: {}", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Backend kind as written in the file
    pub kind: String,
    pub direct: FileDirectConfig,
    pub session_rpc: FileSessionRpcConfig,
    pub local: FileLocalConfig,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default().as_str().to_string(),
            direct: FileDirectConfig::default(),
            session_rpc: FileSessionRpcConfig::default(),
            local: FileLocalConfig::default(),
        }
    }
}

impl FileBackendConfig {
    /// Parse `kind`, falling back to `direct`.
    pub fn parse_kind(&self) -> (BackendKind, Vec<ConfigIssue>) {
        match self.kind.parse::<BackendKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => (
                BackendKind::default(),
                vec![ConfigIssue::invalid_enum(
                    "backend.kind",
                    &self.kind,
                    &BackendKind::VALID_VALUES,
                    BackendKind::default().as_str(),
                )],
            ),
        }
    }
}

/// Raw `[backend.direct]` configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDirectConfig {
    pub base_url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for FileDirectConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            endpoint: "/api/chat".to_string(),
            timeout_secs: 60,
        }
    }
}

impl FileDirectConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::empty("backend.direct.base_url", Severity::Error));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::out_of_range(
                "backend.direct.timeout_secs",
                0,
                "using 1 second",
            ));
        }
        issues
    }
}

/// Raw `[backend.session_rpc]` configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionRpcConfig {
    /// Hosted space id, e.g. `owner/name`
    pub space: Option<String>,
    /// Explicit app URL; wins over `space`
    pub base_url: Option<String>,
    pub submit_procedure: String,
    /// Empty string disables the remote greeting
    pub greeting_procedure: String,
    /// Shown when the app is reachable but its greeting is unavailable
    pub greeting: String,
    /// Shown instead of a greeting when the app cannot be reached
    pub connect_warning: String,
    pub timeout_secs: u64,
}

impl Default for FileSessionRpcConfig {
    fn default() -> Self {
        Self {
            space: Some("selva1909/AI-chat-bot".to_string()),
            base_url: None,
            submit_procedure: "/user_submit".to_string(),
            greeting_procedure: "/lambda".to_string(),
            greeting: DEFAULT_RPC_GREETING.to_string(),
            connect_warning: DEFAULT_CONNECT_WARNING.to_string(),
            timeout_secs: 60,
        }
    }
}

impl FileSessionRpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn greeting_procedure(&self) -> Option<String> {
        let trimmed = self.greeting_procedure.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn base_url(&self) -> Option<&str> {
        Self::non_empty(&self.base_url)
    }

    pub fn space(&self) -> Option<&str> {
        Self::non_empty(&self.space)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.base_url().is_none() && self.space().is_none() {
            issues.push(ConfigIssue::empty(
                "backend.session_rpc.space",
                Severity::Error,
            ));
        }
        if self.submit_procedure.trim().is_empty() {
            issues.push(ConfigIssue::empty(
                "backend.session_rpc.submit_procedure",
                Severity::Error,
            ));
        }
        if self.greeting.trim().is_empty() {
            issues.push(ConfigIssue::empty(
                "backend.session_rpc.greeting",
                Severity::Warning,
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::out_of_range(
                "backend.session_rpc.timeout_secs",
                0,
                "using 1 second",
            ));
        }
        issues
    }
}

/// Raw `[backend.local]` configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLocalConfig {
    /// Pause before each reply, in milliseconds
    pub delay_ms: u64,
    /// Reply for input with no table entry
    pub unknown_reply: String,
    /// Exact (case-insensitive) message to reply table; replaces the built-in one
    pub replies: BTreeMap<String, String>,
}

impl Default for FileLocalConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_LOCAL_DELAY_MS,
            unknown_reply: DEFAULT_UNKNOWN_REPLY.to_string(),
            replies: default_replies(),
        }
    }
}

impl FileLocalConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.unknown_reply.trim().is_empty() {
            issues.push(ConfigIssue::empty(
                "backend.local.unknown_reply",
                Severity::Error,
            ));
        }
        if self.replies.is_empty() {
            issues.push(ConfigIssue::empty(
                "backend.local.replies",
                Severity::Warning,
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_aliases() {
        assert_eq!("direct".parse::<BackendKind>(), Ok(BackendKind::Direct));
        assert_eq!("Session-RPC".parse::<BackendKind>(), Ok(BackendKind::SessionRpc));
        assert_eq!("rpc".parse::<BackendKind>(), Ok(BackendKind::SessionRpc));
        assert_eq!("Offline".parse::<BackendKind>(), Ok(BackendKind::Local));
        assert!("websocket".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let config = FileBackendConfig {
            kind: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let (kind, issues) = config.parse_kind();
        assert_eq!(kind, BackendKind::Direct);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_deserialize_session_rpc_section() {
        let toml_str = r#"
kind = "session_rpc"

[session_rpc]
base_url = "http://localhost:7860"
greeting_procedure = ""
"#;
        let config: FileBackendConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.parse_kind().0, BackendKind::SessionRpc);
        assert_eq!(config.session_rpc.base_url(), Some("http://localhost:7860"));
        assert_eq!(config.session_rpc.greeting_procedure(), None);
        assert_eq!(config.session_rpc.submit_procedure, "/user_submit");
    }

    #[test]
    fn test_session_rpc_greetings_configurable() {
        let toml_str = r#"
[session_rpc]
greeting = "Hello from the space."
connect_warning = "Space is asleep."
"#;
        let config: FileBackendConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session_rpc.greeting, "Hello from the space.");
        assert_eq!(config.session_rpc.connect_warning, "Space is asleep.");
        assert_eq!(
            FileSessionRpcConfig::default().connect_warning,
            DEFAULT_CONNECT_WARNING
        );
    }

    #[test]
    fn test_deserialize_local_section() {
        let toml_str = r#"
kind = "local"

[local]
delay_ms = 0

[local.replies]
ping = "pong"
"#;
        let config: FileBackendConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.parse_kind().0, BackendKind::Local);
        assert_eq!(config.local.delay(), Duration::ZERO);
        assert_eq!(config.local.replies.len(), 1);
        assert_eq!(config.local.unknown_reply, DEFAULT_UNKNOWN_REPLY);
        assert!(config.local.validate().is_empty());
    }

    #[test]
    fn test_missing_target_is_error() {
        let config = FileSessionRpcConfig {
            space: Some("  ".to_string()),
            base_url: None,
            ..Default::default()
        };
        let issues = config.validate();
        assert!(issues.iter().any(ConfigIssue::is_error));
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let config = FileDirectConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.validate().len(), 1);
    }
}
