//! Geolocation API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;

use super::format::{format_outcome, FormattedReply};
use super::types::{GeoApiResponse, GeoOutcome};
use crate::config::{Config, GEO_API_FIELDS};
use crate::error_handling::LookupError;
use crate::validation::PublicIp;

/// Client for the ip-api.com style geolocation endpoint.
///
/// Holds no per-request state; cloning it is cheap.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: Arc<reqwest::Client>,
    base_url: String,
    lang: String,
    timeout: Duration,
}

impl GeoClient {
    pub fn new(
        http: Arc<reqwest::Client>,
        base_url: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            lang: lang.into(),
            timeout,
        }
    }

    pub fn from_config(http: Arc<reqwest::Client>, config: &Config) -> Self {
        Self::new(
            http,
            config.geo_api_url.clone(),
            config.geo_lang.clone(),
            Duration::from_secs(config.geo_timeout_seconds),
        )
    }

    /// URL queried for `ip`, without the query string.
    pub fn endpoint(&self, ip: &PublicIp) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), ip)
    }

    /// Queries the service for `ip`.
    ///
    /// # Errors
    ///
    /// - `LookupError::Transport` on timeout, DNS or connection failure
    /// - `LookupError::Status` when the service does not answer 200 OK
    /// - `LookupError::Parse` when the body is not the expected JSON
    ///
    /// A `"status": "fail"` answer is not an error: it is returned as
    /// [`GeoOutcome::ServiceFailure`].
    pub async fn lookup(&self, ip: &PublicIp) -> Result<GeoOutcome, LookupError> {
        let response = self
            .http
            .get(self.endpoint(ip))
            .query(&[("lang", self.lang.as_str()), ("fields", GEO_API_FIELDS)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("API response [{}]: {} - {}", ip, status.as_u16(), body);

        if status != StatusCode::OK {
            return Err(LookupError::Status(status.as_u16()));
        }

        let parsed: GeoApiResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }

    /// Queries the service and formats the answer. Never fails: every error is
    /// logged and replaced by a fixed reply.
    pub async fn lookup_and_format(&self, ip: &PublicIp) -> FormattedReply {
        self.lookup_and_format_observed(ip, |_| {}).await
    }

    /// Like [`Self::lookup_and_format`], but hands the typed outcome to
    /// `observe` before it is formatted.
    pub async fn lookup_and_format_observed<F>(&self, ip: &PublicIp, observe: F) -> FormattedReply
    where
        F: FnOnce(&Result<GeoOutcome, LookupError>),
    {
        let outcome = self.lookup(ip).await;
        match &outcome {
            Ok(GeoOutcome::Located(_)) => {}
            Ok(GeoOutcome::ServiceFailure { message }) => {
                log::info!("Service could not locate {}: {:?}", ip, message)
            }
            Err(e) => log::warn!("Geolocation lookup for {} failed: {}", ip, e),
        }
        observe(&outcome);
        format_outcome(ip, outcome)
    }
}
