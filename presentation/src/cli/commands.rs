//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Backend selection from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    /// Stateless request/reply HTTP endpoint
    Direct,
    /// Stateful remote session (Gradio-style app)
    SessionRpc,
    /// Canned replies, no server
    Local,
}

impl BackendChoice {
    /// Name used in configuration files
    pub fn config_name(&self) -> &'static str {
        match self {
            BackendChoice::Direct => "direct",
            BackendChoice::SessionRpc => "session_rpc",
            BackendChoice::Local => "local",
        }
    }
}

/// CLI arguments for chatline
#[derive(Parser, Debug)]
#[command(name = "chatline")]
#[command(author, version, about = "Terminal chat client for request/reply and session backends")]
#[command(long_about = r#"
chatline is a terminal chat client. It talks to one of three backends:

  direct       POSTs each message with the full history to an HTTP endpoint
  session-rpc  keeps a remote session open and calls its submit procedure
  local        answers from a built-in table of canned replies

Configuration files are loaded from (in priority order):
1. CHATLINE_* environment variables (e.g. CHATLINE_BACKEND__KIND=session_rpc)
2. --config <path>     Explicit config file
3. ./chatline.toml     Project-level config
4. ~/.config/chatline/config.toml   Global config

Example:
  chatline "What's the capital of Peru?"
  chatline --url http://localhost:5000
  chatline --backend session-rpc --space owner/my-chat-app
  chatline --backend local
"#)]
pub struct Cli {
    /// Send one message, print the reply and exit
    pub message: Option<String>,

    /// Backend to talk to
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendChoice>,

    /// Base URL of the backend
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Hosted space id for the session backend (owner/name)
    #[arg(long, value_name = "ID")]
    pub space: Option<String>,

    /// Maximum characters per message
    #[arg(long, value_name = "N")]
    pub max_chars: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the waiting indicator
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Check that the backend is reachable and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_one_shot_with_overrides() {
        let cli = Cli::parse_from([
            "chatline",
            "--backend",
            "session-rpc",
            "--space",
            "owner/app",
            "-vv",
            "hello there",
        ]);
        assert_eq!(cli.message.as_deref(), Some("hello there"));
        assert_eq!(cli.backend, Some(BackendChoice::SessionRpc));
        assert_eq!(cli.backend.map(|b| b.config_name()), Some("session_rpc"));
        assert_eq!(cli.space.as_deref(), Some("owner/app"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_repl_defaults() {
        let cli = Cli::parse_from(["chatline"]);
        assert!(cli.message.is_none());
        assert!(cli.backend.is_none());
        assert!(!cli.quiet);
        assert!(!cli.check);
    }
}
