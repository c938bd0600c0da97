//! Telegram Bot API transport.
//!
//! This module provides:
//! - [`ChatTransport`]: the send / edit / poll operations the dispatcher needs
//! - [`BotApi`]: its implementation over HTTPS with reqwest
//! - The wire types of the few Bot API methods in use

mod client;
mod transport;
mod types;

// Re-export public API
pub use client::BotApi;
pub use transport::ChatTransport;
pub use types::{
    BotUser, Chat, KeyboardButton, Message, ReplyKeyboardMarkup, Update, User,
};
