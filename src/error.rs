//! Error kinds surfaced by the posting core

use thiserror::Error;

/// The posting capability rejected or failed a post
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The API answered with a non-success status
    #[error("X API rejected the post ({status}): {detail}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Problem detail reported by the API
        detail: String,
    },

    /// The request never completed
    #[error("request to X API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a body we could not understand
    #[error("unexpected response from X API: {0}")]
    InvalidResponse(String),

    /// The request could not be signed
    #[error("failed to sign request: {0}")]
    Signing(String),
}

impl SubmissionError {
    /// Short reason suitable for a one-line status message
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Rejected { status, detail } => format!("{status}: {detail}"),
            Self::Transport(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Transport(_) => "network error".to_string(),
            Self::InvalidResponse(msg) | Self::Signing(msg) => msg.clone(),
        }
    }
}

/// Startup configuration is missing or invalid
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A credential variable is unset or blank
    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    /// The configured API base URL cannot be used
    #[error("invalid API base URL '{0}'")]
    InvalidApiBase(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_reason() {
        let err = SubmissionError::Rejected {
            status: 403,
            detail: "You are not allowed to create a Tweet with duplicate content.".to_string(),
        };
        assert_eq!(
            err.reason(),
            "403: You are not allowed to create a Tweet with duplicate content."
        );
        assert!(err.to_string().starts_with("X API rejected the post (403)"));
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = ConfigurationError::MissingCredential("X_API_KEY");
        assert!(err.to_string().contains("X_API_KEY"));
    }
}
