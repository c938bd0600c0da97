//! Geolocation lookup and reply formatting.
//!
//! This module provides:
//! - [`GeoClient`]: one GET per public IP against the geolocation API
//! - [`format_outcome`]: the fixed, user-facing rendering of every outcome
//! - [`SelfIpClient`]: the public-IP echo lookup behind the "send my IP" button

mod client;
mod format;
mod self_ip;
mod types;

// Re-export public API
pub use client::GeoClient;
pub use format::{escape_html, format_geo_result, format_outcome, FormattedReply};
pub use self_ip::SelfIpClient;
pub use types::{GeoApiResponse, GeoOutcome, GeoResult};
