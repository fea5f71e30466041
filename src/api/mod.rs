//! Posting capability and the X API client behind it

pub mod oauth;
pub mod x;

use crate::error::SubmissionError;
use crate::models::PostResult;

/// Something that can publish a post
#[allow(async_fn_in_trait)]
pub trait PostingApi {
    /// Publish `text` and return the created post
    async fn create_post(&self, text: &str) -> Result<PostResult, SubmissionError>;
}

pub use x::XClient;
