//! Keep-alive HTTP handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::types::{ErrorCounts, InfoCounts, KeepAliveState, StatusResponse};
use crate::config::KEEP_ALIVE_PAGE;
use crate::error_handling::{ErrorType, InfoType};

/// Static page for the hosting platform's liveness probe
pub async fn index_handler() -> Html<&'static str> {
    Html(KEEP_ALIVE_PAGE)
}

/// JSON status endpoint with uptime and outcome counters
pub async fn status_handler(State(state): State<KeepAliveState>) -> Response {
    let stats = &state.stats;

    let response = StatusResponse {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        errors: ErrorCounts {
            total: stats.total_errors(),
            invalid_input: stats.get_error_count(ErrorType::InvalidInput),
            private_address: stats.get_error_count(ErrorType::PrivateAddress),
            geo_transport: stats.get_error_count(ErrorType::GeoTransportError),
            geo_service_failure: stats.get_error_count(ErrorType::GeoServiceFailure),
            geo_parse: stats.get_error_count(ErrorType::GeoParseError),
            self_ip_lookup: stats.get_error_count(ErrorType::SelfIpLookupError),
            reply_delivery: stats.get_error_count(ErrorType::ReplyDeliveryError),
            update_poll: stats.get_error_count(ErrorType::UpdatePollError),
        },
        info: InfoCounts {
            total: stats.total_info(),
            start_command: stats.get_info_count(InfoType::StartCommand),
            help_requested: stats.get_info_count(InfoType::HelpRequested),
            own_ip_requested: stats.get_info_count(InfoType::OwnIpRequested),
            lookup_succeeded: stats.get_info_count(InfoType::LookupSucceeded),
        },
    };

    let json = match serde_json::to_string_pretty(&response) {
        Ok(json) => json,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize status: {}", e),
            )
                .into_response();
        }
    };

    (StatusCode::OK, [("content-type", "application/json")], json).into_response()
}
