//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Enum-like fields stay strings here and are parsed with fallbacks, so a
//! typo produces a warning instead of a load failure.

mod backend;
mod output;
mod session;

pub use backend::{
    BackendKind, FileBackendConfig, FileDirectConfig, FileLocalConfig, FileSessionRpcConfig,
};
pub use output::{FileOutputConfig, MarkupKind};
pub use session::FileSessionConfig;

use super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend selection and per-backend settings
    pub backend: FileBackendConfig,
    /// Input limits and fixed texts
    pub session: FileSessionConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Only the settings of the selected backend are checked.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let (kind, kind_issues) = self.backend.parse_kind();
        issues.extend(kind_issues);
        match kind {
            BackendKind::Direct => issues.extend(self.backend.direct.validate()),
            BackendKind::SessionRpc => issues.extend(self.backend.session_rpc.validate()),
            BackendKind::Local => issues.extend(self.backend.local.validate()),
        }

        issues.extend(self.session.to_session_config().1);
        issues.extend(self.output.parse_markup().1);

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[backend]
kind = "direct"

[backend.direct]
base_url = "http://chat.internal:8080"
timeout_secs = 30

[session]
max_chars = 500

[output]
color = false
markup = "html"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.parse_kind().0, BackendKind::Direct);
        assert_eq!(config.backend.direct.base_url, "http://chat.internal:8080");
        assert_eq!(config.backend.direct.endpoint, "/api/chat");
        assert_eq!(config.backend.direct.timeout_secs, 30);
        assert_eq!(config.session.max_chars, 500);
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[session]
greeting = "Welcome back."
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.greeting, "Welcome back.");
        // Defaults should apply
        assert_eq!(config.backend.kind, "direct");
        assert_eq!(config.session.max_chars, 2000);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[backend]
kind = "session_rpc"

[backend.session_rpc]
space = ""
submit_procedure = ""

[session]
max_chars = 0

[output]
markup = "latex"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }

    #[test]
    fn test_unselected_backend_not_validated() {
        let toml_str = r#"
[backend.session_rpc]
space = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());
    }
}
