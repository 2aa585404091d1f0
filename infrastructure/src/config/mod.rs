//! Configuration file loading for chatline
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHATLINE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./chatline.toml` or `./.chatline.toml`
//! 4. Global: `$XDG_CONFIG_HOME/chatline/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    BackendKind, FileBackendConfig, FileConfig, FileDirectConfig, FileLocalConfig,
    FileOutputConfig, FileSessionConfig, FileSessionRpcConfig, MarkupKind,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::{ConfigLoader, ENV_PREFIX};
