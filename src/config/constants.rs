//! Configuration constants.
//!
//! This module defines the constants used throughout the bot: external service
//! endpoints, timeouts, and the field subset requested from the geolocation API.

use std::time::Duration;

// External services
/// Geolocation API base URL (ip-api.com). The IP is appended as the last path segment.
pub const DEFAULT_GEO_API_URL: &str = "http://ip-api.com/json/";
/// Public-IP echo service used by the "send my IP" button.
pub const DEFAULT_SELF_IP_URL: &str = "https://api.ipify.org";
/// Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
/// Response language requested from the geolocation API.
pub const DEFAULT_GEO_LANG: &str = "ru";
/// Fields requested from the geolocation API.
pub const GEO_API_FIELDS: &str = "status,message,country,city,regionName,lat,lon";

// Timeouts
/// Geolocation request timeout in seconds
pub const GEO_TIMEOUT_SECS: u64 = 10;
/// Public-IP echo request timeout in seconds
pub const SELF_IP_TIMEOUT_SECS: u64 = 5;
/// Long-poll timeout passed to `getUpdates`, in seconds
pub const POLL_TIMEOUT_SECS: u64 = 30;
/// Upper bound Telegram accepts for the long-poll timeout
pub const MAX_POLL_TIMEOUT_SECS: u64 = 50;
/// Extra time on top of the long-poll timeout before the HTTP request itself gives up
pub const POLL_REQUEST_GRACE: Duration = Duration::from_secs(10);
/// Timeout for `sendMessage` / `editMessageText` calls
pub const TELEGRAM_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Pause before polling again after a failed `getUpdates` call
pub const POLL_ERROR_PAUSE: Duration = Duration::from_secs(1);

// Keep-alive server
pub const DEFAULT_KEEP_ALIVE_HOST: &str = "0.0.0.0";
pub const DEFAULT_KEEP_ALIVE_PORT: u16 = 8080;
/// Static page served on `GET /`
pub const KEEP_ALIVE_PAGE: &str = "<h1>IP Geolocation Bot is running!</h1>";

/// User-Agent sent on outbound requests.
pub const USER_AGENT: &str = concat!("ip_geo_bot/", env!("CARGO_PKG_VERSION"));
