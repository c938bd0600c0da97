//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, etc.)
//! - CLI option types and parsing
//! - Configuration validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{BotToken, Config, ConfigValidationError, LogFormat, LogLevel};
