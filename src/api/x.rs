//! X API v2 client

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::PostingApi;
use super::oauth::Signer;
use crate::credentials::Credentials;
use crate::error::{ConfigurationError, SubmissionError};
use crate::models::PostResult;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.x.com";

/// X API client signing every request with OAuth 1.0a
pub struct XClient {
    client: Client,
    api_base: String,
    credentials: Credentials,
}

/// The authenticated user, as returned by `/2/users/me`
#[derive(Debug, Clone, Deserialize)]
pub struct XUser {
    pub id: String,
    pub name: String,
    pub username: String,
}

#[derive(Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
    text: String,
}

/// RFC 7807 style problem body returned on errors
#[derive(Deserialize, Default)]
#[serde(default)]
struct Problem {
    title: Option<String>,
    detail: Option<String>,
    errors: Vec<ProblemEntry>,
}

#[derive(Deserialize)]
struct ProblemEntry {
    message: Option<String>,
}

impl XClient {
    /// Create a client against `api_base` with a per-request timeout
    pub fn new(credentials: Credentials, api_base: &str, timeout: Duration) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/');
        if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
            return Err(ConfigurationError::InvalidApiBase(api_base.to_string()).into());
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wren/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.to_string(),
            credentials,
        })
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/2{}", self.api_base, endpoint)
    }

    /// Fetch the authenticated user to check the credentials work
    pub async fn verify_credentials(&self) -> Result<XUser, SubmissionError> {
        let url = self.api_url("/users/me");
        let auth = Signer::new(&self.credentials).authorize("GET", &url, &[])?;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", auth)
            .send()
            .await?;

        let envelope: DataEnvelope<XUser> = read_json(response).await?;
        Ok(envelope.data)
    }
}

impl PostingApi for XClient {
    async fn create_post(&self, text: &str) -> Result<PostResult, SubmissionError> {
        let url = self.api_url("/tweets");
        let auth = Signer::new(&self.credentials).authorize("POST", &url, &[])?;

        tracing::debug!(chars = text.chars().count(), "POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", auth)
            .json(&CreateTweetRequest { text })
            .send()
            .await?;

        let envelope: DataEnvelope<CreatedTweet> = read_json(response).await?;
        Ok(PostResult::new(envelope.data.id, envelope.data.text))
    }
}

/// Turn a response into `T`, or into `Rejected` when the status is not 2xx
async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, SubmissionError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = problem_detail(&body)
            .or_else(|| status.canonical_reason().map(String::from))
            .unwrap_or_default();
        return Err(SubmissionError::Rejected {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| SubmissionError::InvalidResponse(e.to_string()))
}

/// Most specific message in an error body, falling back to the raw body
fn problem_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let Ok(problem) = serde_json::from_str::<Problem>(body) else {
        return Some(body.to_string());
    };
    problem
        .detail
        .or_else(|| problem.errors.into_iter().find_map(|e| e.message))
        .or(problem.title)
        .or_else(|| Some(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn credentials() -> Credentials {
        Credentials::from_lookup(|name| Some(format!("{name}-value"))).unwrap()
    }

    /// Serve one canned HTTP response, yielding the raw request received
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            while !request_complete(&request) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        buf.len() >= header_end + 4 + length
    }

    #[test]
    fn test_rejects_non_http_base() {
        let result = XClient::new(credentials(), "api.x.com", Duration::from_secs(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_url_trims_slash() {
        let client = XClient::new(credentials(), "https://api.x.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.api_url("/tweets"), "https://api.x.com/2/tweets");
    }

    #[test]
    fn test_problem_detail_preference() {
        assert_eq!(
            problem_detail(r#"{"title":"Forbidden","detail":"duplicate content"}"#).as_deref(),
            Some("duplicate content")
        );
        assert_eq!(
            problem_detail(r#"{"title":"Unauthorized","errors":[{"message":"bad token"}]}"#).as_deref(),
            Some("bad token")
        );
        assert_eq!(
            problem_detail(r#"{"title":"Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(problem_detail("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(problem_detail("  "), None);
    }

    #[tokio::test]
    async fn test_create_post_success() {
        let (base, server) = serve_once(
            "201 Created",
            r#"{"data":{"id":"123","text":"Hello, World!","edit_history_tweet_ids":["123"]}}"#,
        )
        .await;
        let client = XClient::new(credentials(), &base, Duration::from_secs(5)).unwrap();

        let post = client.create_post("Hello, World!").await.unwrap();
        assert_eq!(post, PostResult::new("123", "Hello, World!"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /2/tweets HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: oauth "));
        assert!(request.contains("oauth_consumer_key=\"X_API_KEY-value\""));
        assert!(request.contains(r#"{"text":"Hello, World!"}"#));
    }

    #[tokio::test]
    async fn test_create_post_rejected() {
        let (base, server) = serve_once(
            "403 Forbidden",
            r#"{"title":"Forbidden","detail":"You are not allowed to create a Tweet with duplicate content.","status":403}"#,
        )
        .await;
        let client = XClient::new(credentials(), &base, Duration::from_secs(5)).unwrap();

        let err = client.create_post("Another test").await.unwrap_err();
        match err {
            SubmissionError::Rejected { status, detail } => {
                assert_eq!(status, 403);
                assert!(detail.contains("duplicate content"));
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_create_post_garbled_success_body() {
        let (base, server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let client = XClient::new(credentials(), &base, Duration::from_secs(5)).unwrap();

        let err = client.create_post("hi").await.unwrap_err();
        assert!(matches!(err, SubmissionError::InvalidResponse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"data":{"id":"42","name":"Wren Tester","username":"wren"}}"#,
        )
        .await;
        let client = XClient::new(credentials(), &base, Duration::from_secs(5)).unwrap();

        let user = client.verify_credentials().await.unwrap();
        assert_eq!(user.username, "wren");
        assert!(server.await.unwrap().starts_with("GET /2/users/me HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = XClient::new(credentials(), &format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = client.create_post("hi").await.unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
    }
}
