//! Public-IP echo lookup (ipify style: the body is the caller's IP as plain text).
//!
//! Note that the echoed address is the one the bot's host appears from, since
//! Telegram never reveals a user's address to bots.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;

use crate::config::{Config, SELF_IP_TIMEOUT_SECS};
use crate::error_handling::LookupError;

#[derive(Debug, Clone)]
pub struct SelfIpClient {
    http: Arc<reqwest::Client>,
    url: String,
    timeout: Duration,
}

impl SelfIpClient {
    pub fn new(http: Arc<reqwest::Client>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(http: Arc<reqwest::Client>, config: &Config) -> Self {
        Self::new(
            http,
            config.self_ip_url.clone(),
            Duration::from_secs(SELF_IP_TIMEOUT_SECS),
        )
    }

    /// Fetches the echoed address, trimmed.
    ///
    /// # Errors
    ///
    /// `LookupError::Status` for a non-200 answer, `LookupError::Transport`
    /// for everything that kept the answer from arriving.
    pub async fn fetch(&self) -> Result<String, LookupError> {
        let response = self.http.get(&self.url).timeout(self.timeout).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status(status.as_u16()));
        }

        Ok(response.text().await?.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn client_for(server: &Server) -> SelfIpClient {
        SelfIpClient::new(
            Arc::new(reqwest::Client::new()),
            server.url("/").to_string(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_fetch_returns_trimmed_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(200).body("203.0.113.7\n")),
        );

        let ip = client_for(&server).fetch().await.expect("fetch should succeed");
        assert_eq!(ip, "203.0.113.7");
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_status_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(503)),
        );

        let result = client_for(&server).fetch().await;
        assert!(matches!(result, Err(LookupError::Status(503))));
    }
}
