//! Text routing and the reply keyboard.

use crate::messages::{BUTTON_HELP, BUTTON_OWN_IP};
use crate::telegram::{KeyboardButton, ReplyKeyboardMarkup};

/// What an incoming text asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/start`, `/start@botname` or `/start <payload>`
    Start,
    /// The help button
    Help,
    /// The "send my IP" button
    OwnIp,
    /// Anything else: treated as an IP address candidate
    Candidate(&'a str),
}

/// Routes a message text. Surrounding whitespace is ignored.
///
/// `/start@name` only counts when `name` is `bot_username` (case-insensitive);
/// a command addressed to another bot is an ordinary candidate. While the
/// bot's username is unknown, any mention is accepted.
pub fn route<'a>(text: &'a str, bot_username: Option<&str>) -> Route<'a> {
    let text = text.trim();

    let command = text.split_whitespace().next().unwrap_or_default();
    let (name, mention) = match command.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (command, None),
    };
    let addressed_to_us = match (mention, bot_username) {
        (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
        _ => true,
    };
    if name == "/start" && addressed_to_us {
        return Route::Start;
    }

    match text {
        BUTTON_OWN_IP => Route::OwnIp,
        BUTTON_HELP => Route::Help,
        candidate => Route::Candidate(candidate),
    }
}

/// The two-button keyboard shown with the greeting.
pub fn main_keyboard() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup {
        keyboard: vec![
            vec![KeyboardButton {
                text: BUTTON_OWN_IP.to_string(),
            }],
            vec![KeyboardButton {
                text: BUTTON_HELP.to_string(),
            }],
        ],
        resize_keyboard: true,
        one_time_keyboard: false,
    }
}
