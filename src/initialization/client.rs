//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::USER_AGENT;
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client.
///
/// One `reqwest::Client` (one connection pool) serves the geolocation API, the
/// public-IP echo service and the Telegram Bot API. Timeouts differ per call, so
/// they are set on each request rather than on the client.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot be
/// initialized.
pub fn init_client() -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
    Ok(Arc::new(client))
}
