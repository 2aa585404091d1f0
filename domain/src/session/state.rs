//! Turn-taking states

use serde::{Deserialize, Serialize};

/// State of the session controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// Waiting for the user; submissions are accepted
    #[default]
    Idle,
    /// A turn is pending; submissions are refused
    Sending,
}

impl ControllerState {
    pub fn accepts_submission(&self) -> bool {
        matches!(self, ControllerState::Idle)
    }

    /// The typing indicator shown for this state.
    pub fn indicator(&self) -> IndicatorState {
        match self {
            ControllerState::Idle => IndicatorState::Idle,
            ControllerState::Sending => IndicatorState::Waiting,
        }
    }
}

/// Busy/typing indicator state, derived from [`ControllerState`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    #[default]
    Idle,
    Waiting,
}

impl IndicatorState {
    pub fn is_visible(&self) -> bool {
        matches!(self, IndicatorState::Waiting)
    }
}
