//! Submission flow: trigger, post, feedback, deferred cleanup
//!
//! ```text
//! Idle -> Submitting -> SuccessShown -> Idle
//!                    -> FailureShown -> Idle
//! ```
//!
//! The return to `Idle` happens in [`SubmissionFlow::poll`] once the feedback
//! delay has elapsed. The delay is counted from the moment feedback is
//! shown, after the posting call returns. [`SubmissionFlow::poll`] takes
//! `now` explicitly so the event loop owns the clock.

use std::time::{Duration, Instant};

use super::DraftSession;
use crate::api::PostingApi;
use crate::error::SubmissionError;
use crate::models::{PostResult, SubmissionResult};

/// Where the flow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Submitting,
    SuccessShown,
    FailureShown,
}

/// What a submit trigger turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Accepted; post this trimmed text
    Send(String),
    /// Draft is empty or whitespace, nothing happens
    Blank,
    /// A previous submission has not returned to `Idle` yet
    Busy,
}

/// Result of [`SubmissionFlow::submit`] when no error occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to post
    Blank,
    /// Ignored because another submission is in progress
    Busy,
    /// Published
    Posted(PostResult),
}

/// Drives one submission at a time and the feedback that follows it
#[derive(Debug)]
pub struct SubmissionFlow {
    state: FlowState,
    feedback: Option<SubmissionResult>,
    cleanup_at: Option<Instant>,
    delay: Duration,
    clear_on_failure: bool,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, true)
    }
}

impl SubmissionFlow {
    /// How long feedback stays on screen before the draft is cleared
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    /// Create a flow with the given feedback delay.
    ///
    /// With `clear_on_failure` unset, a failed draft survives the cleanup so
    /// it can be resubmitted; only the message is removed.
    pub const fn new(delay: Duration, clear_on_failure: bool) -> Self {
        Self {
            state: FlowState::Idle,
            feedback: None,
            cleanup_at: None,
            delay,
            clear_on_failure,
        }
    }

    pub const fn state(&self) -> FlowState {
        self.state
    }

    /// Feedback currently on display, if any
    pub const fn feedback(&self) -> Option<&SubmissionResult> {
        self.feedback.as_ref()
    }

    /// When the pending cleanup will fire
    pub const fn cleanup_at(&self) -> Option<Instant> {
        self.cleanup_at
    }

    /// Accept or reject a submit trigger.
    ///
    /// Blank drafts leave the state untouched. An accepted trigger moves the
    /// flow to `Submitting`; until it returns to `Idle` further triggers
    /// report [`Trigger::Busy`].
    pub fn begin(&mut self, draft: &DraftSession) -> Trigger {
        if self.state != FlowState::Idle {
            tracing::debug!(state = ?self.state, "Submit ignored, flow busy");
            return Trigger::Busy;
        }
        let text = draft.text().trim();
        if text.is_empty() {
            return Trigger::Blank;
        }
        self.state = FlowState::Submitting;
        Trigger::Send(text.to_string())
    }

    /// Record the result of the posting call and schedule cleanup.
    ///
    /// Failures are shown first, then handed back to the caller unchanged.
    pub fn finish(
        &mut self,
        result: Result<PostResult, SubmissionError>,
        now: Instant,
    ) -> Result<PostResult, SubmissionError> {
        self.cleanup_at = Some(now + self.delay);
        match result {
            Ok(post) => {
                tracing::info!(id = %post.id, "Post published");
                self.feedback = Some(SubmissionResult::from(&post));
                self.state = FlowState::SuccessShown;
                Ok(post)
            }
            Err(e) => {
                tracing::warn!("Post failed: {}", e);
                self.feedback = Some(SubmissionResult::from(&e));
                self.state = FlowState::FailureShown;
                Err(e)
            }
        }
    }

    /// Run a full submission against `api`.
    pub async fn submit<A: PostingApi>(
        &mut self,
        draft: &DraftSession,
        api: &A,
    ) -> Result<Outcome, SubmissionError> {
        let text = match self.begin(draft) {
            Trigger::Send(text) => text,
            Trigger::Blank => return Ok(Outcome::Blank),
            Trigger::Busy => return Ok(Outcome::Busy),
        };
        let result = api.create_post(&text).await;
        self.finish(result, Instant::now()).map(Outcome::Posted)
    }

    /// Fire the deferred cleanup if it is due.
    ///
    /// Returns `true` when cleanup ran.
    pub fn poll(&mut self, draft: &mut DraftSession, now: Instant) -> bool {
        match self.cleanup_at {
            Some(due) if now >= due => {}
            _ => return false,
        }
        if self.state == FlowState::SuccessShown || self.clear_on_failure {
            draft.clear();
        }
        self.feedback = None;
        self.cleanup_at = None;
        self.state = FlowState::Idle;
        true
    }
}
