//! Outcome of a single submission attempt

use super::PostResult;
use crate::error::SubmissionError;

/// Result of one submit, kept only until its feedback message is cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The post was published
    Success {
        /// Network-assigned post ID
        id: String,
        /// Text echoed back by the network
        echoed_text: String,
    },
    /// The post was not published
    Failure {
        /// Short human-readable reason
        reason: String,
    },
}

impl SubmissionResult {
    /// Whether the attempt succeeded
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Message shown to the user while feedback is displayed
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success { .. } => "Post successfully sent!",
            Self::Failure { .. } => "Post failed to send!",
        }
    }
}

impl From<&PostResult> for SubmissionResult {
    fn from(post: &PostResult) -> Self {
        Self::Success {
            id: post.id.clone(),
            echoed_text: post.text.clone(),
        }
    }
}

impl From<&SubmissionError> for SubmissionResult {
    fn from(err: &SubmissionError) -> Self {
        Self::Failure {
            reason: err.reason(),
        }
    }
}
