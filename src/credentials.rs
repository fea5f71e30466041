//! X API credentials (OAuth 1.0a user context)
//!
//! The four values are read once at startup and then passed around as a
//! plain value. Only [`Credentials::from_env`] touches the process
//! environment.

use std::fmt;

use crate::error::ConfigurationError;

/// Environment variable holding the API (consumer) key
pub const API_KEY_VAR: &str = "X_API_KEY";
/// Environment variable holding the API (consumer) secret
pub const API_SECRET_VAR: &str = "X_API_SECRET";
/// Environment variable holding the user access token
pub const ACCESS_TOKEN_VAR: &str = "X_ACCESS_TOKEN";
/// Environment variable holding the user access token secret
pub const ACCESS_SECRET_VAR: &str = "X_ACCESS_SECRET";

/// All variables, in the order they are checked
pub const ALL_VARS: [&str; 4] = [API_KEY_VAR, API_SECRET_VAR, ACCESS_TOKEN_VAR, ACCESS_SECRET_VAR];

/// The four values needed to sign requests
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl Credentials {
    /// Load credentials from the process environment
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through `lookup`, which maps a variable name to its
    /// value. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigurationError::MissingCredential(name))
        };

        Ok(Self {
            api_key: get(API_KEY_VAR)?,
            api_secret: get(API_SECRET_VAR)?,
            access_token: get(ACCESS_TOKEN_VAR)?,
            access_secret: get(ACCESS_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_all_present() {
        let env = vars(&[
            (API_KEY_VAR, "key"),
            (API_SECRET_VAR, "secret"),
            (ACCESS_TOKEN_VAR, "token"),
            (ACCESS_SECRET_VAR, " token-secret\n"),
        ]);
        let creds = Credentials::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.access_secret, "token-secret");
    }

    #[test]
    fn test_missing_variable_is_named() {
        let env = vars(&[(API_KEY_VAR, "key"), (API_SECRET_VAR, "secret")]);
        let err = Credentials::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingCredential(ACCESS_TOKEN_VAR)
        ));
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let err = Credentials::from_lookup(|_| Some("   ".to_string())).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingCredential(API_KEY_VAR)
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::from_lookup(|name| Some(format!("value-of-{name}"))).unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("value-of-X_API_KEY"));
        assert!(!debug.contains("value-of-X_API_SECRET"));
        assert!(!debug.contains("value-of-X_ACCESS_SECRET"));
    }
}
