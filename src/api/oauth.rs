//! OAuth 1.0a request signing (HMAC-SHA1, user context)

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;

use crate::credentials::Credentials;
use crate::error::SubmissionError;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// RFC 3986 percent-encoding (everything but unreserved characters)
fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Random alphanumeric nonce
pub fn nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Signs requests with one set of user credentials
pub struct Signer<'a> {
    credentials: &'a Credentials,
}

impl<'a> Signer<'a> {
    pub const fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// `Authorization` header value for a request made now.
    ///
    /// `url` must not carry a query string; pass query or form parameters in
    /// `params`. JSON bodies are not part of the signature.
    pub fn authorize(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, SubmissionError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorize_with(method, url, params, &nonce(), &timestamp)
    }

    /// Same as [`Signer::authorize`] with a fixed nonce and timestamp
    pub fn authorize_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, SubmissionError> {
        let mut oauth = self.oauth_params(nonce, timestamp);
        let signature = self.signature(method, url, params, &oauth)?;
        oauth.push(("oauth_signature", signature));
        oauth.sort();

        let fields: Vec<String> = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect();
        Ok(format!("OAuth {}", fields.join(", ")))
    }

    fn oauth_params(&self, nonce: &str, timestamp: &str) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.api_key.clone()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.access_token.clone()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth: &[(&'static str, String)],
    ) -> Result<String, SubmissionError> {
        let base = base_string(method, url, params, oauth);
        let key = format!(
            "{}&{}",
            encode(&self.credentials.api_secret),
            encode(&self.credentials.access_secret)
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| SubmissionError::Signing(e.to_string()))?;
        mac.update(base.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

/// Signature base string: `METHOD&url&sorted-params`, each part encoded
fn base_string(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    oauth: &[(&'static str, String)],
) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .chain(oauth.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    pairs.sort();

    let param_string = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&param_string)
    )
}
