//! CLI entrypoint for chatline
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use chatline_application::{SessionController, SubmitOutcome};
use chatline_infrastructure::{
    BackendKind, ConfigLoader, FileConfig, Severity, build_backend, probe_backend, renderer_for,
};
use chatline_presentation::{ChatRepl, Cli, ConsoleSink, OutputConfig};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("Config error: {}", issue.message),
        }
    }

    info!("Starting chatline ({} backend)", config.backend.parse_kind().0);

    if cli.check {
        return match probe_backend(&config).await {
            Ok(summary) => {
                println!("{}", summary);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    // === Dependency Injection ===
    let adapter = build_backend(&config)?;
    let (session_config, _) = config.session.to_session_config();
    let (markup, _) = config.output.parse_markup();

    let output = OutputConfig::default()
        .with_color(config.output.color)
        .with_indicator(!cli.quiet)
        .with_echo_user(config.output.echo_user);
    let sink = Arc::new(ConsoleSink::new(&output));

    let mut controller = SessionController::new(adapter, sink.clone())
        .with_config(session_config)
        .with_renderer(renderer_for(markup, config.output.color));

    // Single message mode
    if let Some(message) = cli.message {
        controller.start().await;
        return match controller.submit(&message).await {
            SubmitOutcome::Replied(_) => Ok(ExitCode::SUCCESS),
            SubmitOutcome::Failed { .. } => Ok(ExitCode::FAILURE),
            SubmitOutcome::Rejected(rejection) => bail!("{}", rejection),
        };
    }

    let mut repl = ChatRepl::new(controller, sink);
    repl.run().await?;

    Ok(ExitCode::SUCCESS)
}

/// Command-line flags win over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(backend) = cli.backend {
        config.backend.kind = backend.config_name().to_string();
    }

    if let Some(space) = &cli.space {
        config.backend.session_rpc.space = Some(space.clone());
        config.backend.session_rpc.base_url = None;
    }

    if let Some(url) = &cli.url {
        match config.backend.parse_kind().0 {
            BackendKind::Direct => config.backend.direct.base_url = url.clone(),
            BackendKind::SessionRpc => config.backend.session_rpc.base_url = Some(url.clone()),
            BackendKind::Local => warn!("--url is ignored by the local backend"),
        }
    }

    if let Some(max_chars) = cli.max_chars {
        config.session.max_chars = max_chars;
    }

    if cli.no_color {
        config.output.color = false;
    }
}
