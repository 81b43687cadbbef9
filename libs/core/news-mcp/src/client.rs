//! HTTP client using the Typestate pattern
//!
//! The client must be initialized before making requests. Invalid states
//! (like fetching without initialization) are compile-time errors.

use crate::error::{Error, ErrorContext, Result};
use std::time::Duration;

/// Default per-request timeout. The core never times out a fetch itself.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker type: Client is not yet initialized
pub struct Uninitialized;

/// State of an initialized client: holds the built HTTP client
#[derive(Clone)]
pub struct Ready {
    http: reqwest::Client,
}

/// HTTP client shared by the news sources
///
/// Transitions from `Uninitialized` to `Ready` via `init()`.
#[derive(Clone)]
pub struct NewsClient<State> {
    user_agent: String,
    timeout: Duration,
    state: State,
}

impl NewsClient<Uninitialized> {
    pub fn new() -> Self {
        Self {
            user_agent: concat!("news-mcp/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            state: Uninitialized,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the underlying HTTP client, transitioning to `Ready`
    pub fn init(self) -> Result<NewsClient<Ready>> {
        let http = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .with_context("client initialization")?;

        Ok(NewsClient {
            user_agent: self.user_agent,
            timeout: self.timeout,
            state: Ready { http },
        })
    }
}

impl Default for NewsClient<Uninitialized> {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsClient<Ready> {
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a GET request.
    ///
    /// `url` must not carry secrets: it ends up in error messages. Pass
    /// credentials through `query` instead. 429 is mapped to
    /// [`Error::RateLimited`]; other statuses are left to the caller.
    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let response = self
            .state
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(url)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(Error::RateLimited { retry_after });
        }

        Ok(response)
    }

    /// GET `url` and return the body, failing on non-success statuses
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url, &[]).await?;
        let response = ensure_success(response, url)?;
        let bytes = response.bytes().await.with_context(url)?;
        Ok(bytes.to_vec())
    }
}

/// Turn a non-success status into [`Error::Upstream`]
pub fn ensure_success(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Upstream {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_typestate_init() {
        // fetching is only available after init()
        let client = NewsClient::new().init();
        assert!(client.is_ok());
    }

    #[test]
    fn test_custom_settings_survive_init() {
        let client = NewsClient::new()
            .with_user_agent("CustomAgent/1.0")
            .with_timeout(Duration::from_secs(5))
            .init()
            .unwrap();
        assert_eq!(client.user_agent(), "CustomAgent/1.0");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_get_bytes_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/feed.xml");
                then.status(200).body("<rss/>");
            })
            .await;

        let client = NewsClient::new().init().unwrap();
        let body = client.get_bytes(&server.url("/feed.xml")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, b"<rss/>");
    }

    #[tokio::test]
    async fn test_non_success_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.xml");
                then.status(404);
            })
            .await;

        let client = NewsClient::new().init().unwrap();
        let err = client
            .get_bytes(&server.url("/missing.xml"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_too_many_requests_is_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/busy");
                then.status(429).header("retry-after", "120");
            })
            .await;

        let client = NewsClient::new().init().unwrap();
        let err = client.get_bytes(&server.url("/busy")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::RateLimited {
                retry_after: Some(120)
            }
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        let client = NewsClient::new().init().unwrap();
        let err = client
            .get_bytes("http://127.0.0.1:1/feed.xml")
            .await
            .unwrap_err();
        match err {
            Error::Fetch { url, .. } => assert_eq!(url, "http://127.0.0.1:1/feed.xml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
