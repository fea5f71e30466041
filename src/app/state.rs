//! Application state

use crate::compose::{DraftSession, SubmissionFlow};
use crate::config::Config;
use crate::theme::Theme;

/// Everything the composer screen reads and mutates
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Current theme
    pub theme: Theme,
    /// Whether to quit
    pub should_quit: bool,

    /// The draft being written
    pub draft: DraftSession,
    /// Submission state and feedback
    pub flow: SubmissionFlow,
    /// Accepted text waiting for the next loop turn to be sent
    pub pending_submit: Option<String>,

    /// Status message (bottom bar)
    pub status: String,
}

impl AppState {
    /// Create a new app state
    pub fn new(config: Config) -> Self {
        let flow = SubmissionFlow::new(config.feedback_delay(), config.clear_draft_on_failure);
        Self {
            theme: config.theme,
            config,
            should_quit: false,
            draft: DraftSession::new(),
            flow,
            pending_submit: None,
            status: String::new(),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    /// Cycle through themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
        self.set_status(format!("✓ Theme set to {}", self.theme.name()));
    }
}
