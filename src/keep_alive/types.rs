//! Keep-alive server data structures.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::error_handling::ProcessingStats;

/// Shared state for the keep-alive server
#[derive(Clone)]
pub struct KeepAliveState {
    pub start_time: Arc<Instant>,
    pub stats: Arc<ProcessingStats>,
}

impl KeepAliveState {
    pub fn new(stats: Arc<ProcessingStats>) -> Self {
        Self {
            start_time: Arc::new(Instant::now()),
            stats,
        }
    }
}

/// JSON response for `/status` endpoint
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: f64,
    pub errors: ErrorCounts,
    pub info: InfoCounts,
}

#[derive(Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub invalid_input: usize,
    pub private_address: usize,
    pub geo_transport: usize,
    pub geo_service_failure: usize,
    pub geo_parse: usize,
    pub self_ip_lookup: usize,
    pub reply_delivery: usize,
    pub update_poll: usize,
}

#[derive(Serialize)]
pub struct InfoCounts {
    pub total: usize,
    pub start_command: usize,
    pub help_requested: usize,
    pub own_ip_requested: usize,
    pub lookup_succeeded: usize,
}
