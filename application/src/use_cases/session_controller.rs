//! Session controller use case.
//!
//! Owns the conversation for one chat session and sequences turn-taking:
//!
//! 1. Validate the user's input against the [`InputPolicy`]
//! 2. Append the user turn, show the typing indicator, lock the input
//! 3. Hand the message to the active [`BackendAdapter`]
//! 4. Append the reply, or a fixed failure message, then unlock the input
//!
//! Only one turn can be pending at a time. A second submission while a turn
//! is in flight is refused by the state machine, so assistant turns always
//! land in submission order.

use crate::config::SessionConfig;
use crate::ports::backend_adapter::{AdapterError, BackendAdapter};
use crate::ports::markup_renderer::{MarkupRenderer, PlainTextRenderer};
use crate::ports::presentation_sink::PresentationSink;
use crate::use_cases::failure_messages::FailureMessages;
use chatline_domain::util::preview;
use chatline_domain::{
    ControllerState, IndicatorState, InputPolicy, InputRejection, Role, Transcript, Turn,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a submission was refused. A refused submission changes nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    #[error("A message is already being sent")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] InputRejection),
}

/// The single in-flight user submission.
///
/// Only [`SessionController::begin_submit`] creates one, and
/// [`SessionController::resolve`] consumes it.
#[derive(Debug)]
pub struct PendingTurn {
    text: String,
}

impl PendingTurn {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Result of [`SessionController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent; transcript and state are unchanged.
    Rejected(SubmitRejection),
    /// The backend replied; `turn` is the appended assistant turn.
    Replied(Turn),
    /// The backend failed; `turn` is the appended failure message.
    Failed { error: AdapterError, turn: Turn },
}

/// Orchestrates one chat session.
///
/// Created per session and discarded when the session ends. The transcript
/// lives here and nowhere else.
pub struct SessionController {
    adapter: Arc<dyn BackendAdapter>,
    sink: Arc<dyn PresentationSink>,
    renderer: Arc<dyn MarkupRenderer>,
    config: SessionConfig,
    policy: InputPolicy,
    messages: FailureMessages,
    transcript: Transcript,
    state: ControllerState,
}

impl SessionController {
    pub fn new(adapter: Arc<dyn BackendAdapter>, sink: Arc<dyn PresentationSink>) -> Self {
        let config = SessionConfig::default();
        Self {
            adapter,
            sink,
            renderer: Arc::new(PlainTextRenderer),
            policy: config.input_policy(),
            config,
            messages: FailureMessages::default(),
            transcript: Transcript::new(),
            state: ControllerState::Idle,
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.policy = config.input_policy();
        self.config = config;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn MarkupRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_failure_messages(mut self, messages: FailureMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn indicator(&self) -> IndicatorState {
        self.state.indicator()
    }

    pub fn is_busy(&self) -> bool {
        !self.state.accepts_submission()
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn adapter_name(&self) -> &str {
        self.adapter.name()
    }

    /// Show the opening greeting and unlock the input.
    ///
    /// The greeting comes from the adapter when it has one, otherwise from
    /// the configuration. It is shown but not recorded in the transcript.
    pub async fn start(&self) -> String {
        let greeting = match self.adapter.greeting().await {
            Some(text) => text,
            None => self.config.greeting.clone(),
        };
        debug!("Session greeting: {}", preview(&greeting, 80));
        self.emit(Role::Assistant, &greeting);
        self.sink.set_indicator_visible(false);
        self.sink.set_input_enabled(self.state.accepts_submission());
        greeting
    }

    /// Update the submit control for the current input text.
    ///
    /// Returns whether submission is enabled.
    pub fn input_changed(&self, raw: &str) -> bool {
        let enabled = self.state.accepts_submission() && self.policy.allows_submission(raw);
        self.sink.set_input_enabled(enabled);
        enabled
    }

    /// Accept a submission and move to `Sending`.
    pub fn begin_submit(&mut self, raw: &str) -> Result<PendingTurn, SubmitRejection> {
        if !self.state.accepts_submission() {
            debug!("Submission refused: turn already pending");
            return Err(SubmitRejection::Busy);
        }
        let text = self.policy.validate(raw)?.to_string();

        info!("Submitting turn: {}", preview(&text, 100));
        self.transcript.append(Turn::user(text.clone()));
        self.emit(Role::User, &text);
        self.state = ControllerState::Sending;
        self.sink.set_indicator_visible(true);
        self.sink.set_input_enabled(false);

        Ok(PendingTurn { text })
    }

    /// Settle the pending turn and return to `Idle`.
    ///
    /// Exactly one assistant turn is appended either way.
    pub fn resolve(&mut self, pending: PendingTurn, result: Result<String, AdapterError>) -> Turn {
        debug_assert_eq!(self.state, ControllerState::Sending);
        let turn = match result {
            Ok(reply) => {
                debug!(
                    "Reply for '{}': {}",
                    preview(pending.text(), 40),
                    preview(&reply, 100)
                );
                Turn::assistant(reply)
            }
            Err(error) => {
                warn!("Turn failed via {}: {}", self.adapter.name(), error);
                Turn::failure(self.messages.for_error(&error))
            }
        };

        self.transcript.append(turn.clone());
        self.emit(Role::Assistant, turn.content());
        self.state = ControllerState::Idle;
        self.sink.set_indicator_visible(false);
        self.sink.set_input_enabled(true);
        turn
    }

    /// Run one full turn against the active adapter.
    pub async fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let pending = match self.begin_submit(raw) {
            Ok(pending) => pending,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };

        let adapter = Arc::clone(&self.adapter);
        let mut history = self.transcript.as_adapter_history();
        // The pending user turn travels separately as `user_text`
        history.pop();
        let result = adapter.send_turn(pending.text(), &history).await;

        let error = result.as_ref().err().cloned();
        let turn = self.resolve(pending, result);
        match error {
            None => SubmitOutcome::Replied(turn),
            Some(error) => SubmitOutcome::Failed { error, turn },
        }
    }

    /// Start over with an empty transcript.
    ///
    /// Refused while a turn is pending. Returns whether the reset happened.
    pub async fn reset(&mut self) -> bool {
        if !self.state.accepts_submission() {
            return false;
        }
        info!("Resetting session ({} turns dropped)", self.transcript.len());
        self.transcript = Transcript::new();
        self.adapter.reset().await;
        true
    }

    fn emit(&self, role: Role, text: &str) {
        self.sink.append_entry(role, &self.renderer.render(text));
    }
}
