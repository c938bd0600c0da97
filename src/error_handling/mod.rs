//! Error handling and outcome statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, lookups and the Telegram API
//! - Outcome statistics (errors and info events) shared with the status endpoint
//!
//! None of these errors is ever shown to a chat user verbatim: the dispatcher
//! maps each of them to a fixed reply.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, LookupError, TelegramError};
