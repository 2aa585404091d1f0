//! Waiting indicator shown while a reply is pending

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner that appears while the assistant is "typing".
///
/// Showing an already visible indicator or hiding a hidden one is a no-op.
pub struct WaitingIndicator {
    enabled: bool,
    message: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl WaitingIndicator {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            message: "Assistant is typing...".to_string(),
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn show(&self) {
        if !self.enabled {
            return;
        }
        if let Ok(mut slot) = self.bar.lock() {
            if slot.is_none() {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.set_message(self.message.clone());
                pb.enable_steady_tick(Duration::from_millis(100));
                *slot = Some(pb);
            }
        }
    }

    pub fn hide(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl Drop for WaitingIndicator {
    fn drop(&mut self) {
        self.hide();
    }
}
