//! User-facing notification channel.
//!
//! Constructed once at startup and passed by reference to the code that
//! reports outcomes; notifications are emitted as tracing events so the
//! subscriber installed by the binary decides how they surface.

use tracing::{error, info};

/// Diagnostic shown when the content-view argument is not a layout field.
pub const UNRESOLVED_LAYOUT_MESSAGE: &str =
    "Couldn't resolve the layout: the value inside setContentView isn't an R.layout field";

/// Named notification channel for migration outcomes.
pub struct Notifier {
    channel: &'static str,
}

impl Notifier {
    /// Creates the channel used by the content-view migration.
    pub fn new() -> Self {
        Self {
            channel: "setContentView-to-binding",
        }
    }

    /// Emits an error notification.
    pub fn error(&self, message: &str) {
        error!(channel = self.channel, "{message}");
    }

    /// Emits an informational notification.
    pub fn info(&self, message: &str) {
        info!(channel = self.channel, "{message}");
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
