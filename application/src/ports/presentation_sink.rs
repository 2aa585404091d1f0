//! Port for rendering the conversation.
//!
//! The session controller pushes every visible change through
//! [`PresentationSink`]: new transcript entries, the typing indicator, and
//! whether the input control accepts a submission.

use chatline_domain::Role;

/// Narrow rendering surface consumed by the session controller.
///
/// Methods are synchronous and non-fallible; a sink that cannot draw
/// simply drops the update.
pub trait PresentationSink: Send + Sync {
    /// Show a new entry. `markup` has already been rendered.
    fn append_entry(&self, role: Role, markup: &str);

    /// Show or hide the typing indicator.
    fn set_indicator_visible(&self, visible: bool);

    /// Enable or disable the submit control.
    fn set_input_enabled(&self, enabled: bool);
}

/// No-op implementation for tests and headless use.
pub struct NoPresentation;

impl PresentationSink for NoPresentation {
    fn append_entry(&self, _role: Role, _markup: &str) {}

    fn set_indicator_visible(&self, _visible: bool) {}

    fn set_input_enabled(&self, _enabled: bool) {}
}
