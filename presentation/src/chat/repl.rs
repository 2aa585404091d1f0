//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::{ConsoleFormatter, ConsoleSink};
use chatline_application::{SessionController, SubmitOutcome};
use chatline_domain::InputPolicy;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::debug;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Reset,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for ordinary messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let command = match line {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            "/reset" | "/clear" => ReplCommand::Reset,
            other => ReplCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Interactive chat REPL
///
/// `sink` must be the sink the controller reports to; its input gate
/// decides whether a typed line is sent.
pub struct ChatRepl {
    controller: SessionController,
    sink: Arc<ConsoleSink>,
    prompt: String,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: SessionController, sink: Arc<ConsoleSink>) -> Self {
        Self {
            controller,
            sink,
            prompt: ">>> ".to_string(),
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        self.print_welcome();
        self.controller.start().await;

        loop {
            let readline = rl.readline(&self.prompt);

            match readline {
                Ok(line) => {
                    if let Some(command) = ReplCommand::parse(&line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.as_str());

                    let _ = self.process_message(&line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                  chatline                   │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Backend: {}   Limit: {} characters",
            self.controller.adapter_name(),
            self.controller.input_policy().max_chars()
        );
        println!("Type /help for commands, Ctrl-D to exit.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show the conversation so far");
        println!("  /reset, /clear    - Start a new conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                Self::print_help();
                false
            }
            ReplCommand::History => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_transcript(self.controller.transcript())
                );
                println!();
                false
            }
            ReplCommand::Reset => {
                if self.controller.reset().await {
                    println!("{}", "Conversation cleared.".dimmed());
                    self.controller.start().await;
                } else {
                    println!("Cannot reset while a reply is pending.");
                }
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&mut self, line: &str) -> Option<SubmitOutcome> {
        self.controller.input_changed(line);
        if !self.sink.input_enabled() {
            let len = InputPolicy::count(line);
            let max = self.controller.input_policy().max_chars();
            if len > max {
                println!("{}", ConsoleFormatter::over_limit_hint(len, max));
            } else {
                debug!("Input not submittable as typed");
            }
            return None;
        }

        let outcome = self.controller.submit(line).await;
        match &outcome {
            SubmitOutcome::Replied(_) => {}
            SubmitOutcome::Failed { error, .. } => {
                debug!("Turn failed: {}", error);
            }
            SubmitOutcome::Rejected(rejection) => {
                debug!("Submission rejected: {}", rejection);
            }
        }
        Some(outcome)
    }
}
