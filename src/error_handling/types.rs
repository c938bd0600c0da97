//! Error type definitions.
//!
//! This module defines the error enums returned by fallible operations and the
//! outcome kinds counted by [`super::ProcessingStats`].

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of a single outbound lookup (geolocation or public-IP echo).
///
/// The display text is meant for logs only. Users always get a fixed reply.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Timeout, DNS failure, refused connection or a broken body stream.
    #[error("request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The service answered with something other than 200 OK.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not the JSON we asked for.
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LookupError {
    /// Maps the failure onto the counted outcome kind.
    pub fn error_type(&self) -> ErrorType {
        match self {
            LookupError::Transport(_) | LookupError::Status(_) => ErrorType::GeoTransportError,
            LookupError::Parse(_) => ErrorType::GeoParseError,
        }
    }
}

/// Failure of a Telegram Bot API call.
#[derive(Error, Debug)]
pub enum TelegramError {
    /// The HTTP exchange itself failed.
    #[error("Telegram request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// Telegram answered with `"ok": false`.
    #[error("Telegram API error: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    /// Telegram answered `"ok": true` without the `result` the method promises.
    #[error("Telegram response for {0} has no result")]
    MissingResult(&'static str),
}

/// Outcomes that end a request without a geolocation answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Rejected input
    InvalidInput,
    PrivateAddress,
    // Geolocation service
    GeoTransportError, // timeout, connection failure or non-200
    GeoServiceFailure, // status == "fail"
    GeoParseError,
    // Public-IP echo service
    SelfIpLookupError,
    // Telegram
    ReplyDeliveryError,
    UpdatePollError,
}

/// Notable events that are not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    StartCommand,
    HelpRequested,
    OwnIpRequested,
    LookupSucceeded,
}
