//! Post returned by the posting capability

/// A post as echoed back by the API after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResult {
    /// Network-assigned post ID
    pub id: String,
    /// Text as stored by the network
    pub text: String,
}

impl PostResult {
    /// Create a new post result
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Public URL of the post
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://x.com/i/web/status/{}", self.id)
    }
}
