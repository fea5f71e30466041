//! Data models for Wren

mod post;
mod submission;

pub use post::PostResult;
pub use submission::SubmissionResult;
