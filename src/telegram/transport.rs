//! The chat operations the dispatcher depends on.

use async_trait::async_trait;

use super::types::{Message, ReplyKeyboardMarkup, Update};
use crate::error_handling::TelegramError;
use crate::geo::FormattedReply;

/// Chat platform operations used by the dispatcher.
///
/// [`super::BotApi`] implements it against the Telegram Bot API; tests plug in
/// an in-memory recorder.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Long-polls for updates with `update_id >= offset`.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError>;

    /// Sends `reply` to `chat_id`, optionally as a reply to another message and
    /// with a reply keyboard. Returns the sent message so it can be edited later.
    async fn send_message(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        reply: &FormattedReply,
        keyboard: Option<&ReplyKeyboardMarkup>,
    ) -> Result<Message, TelegramError>;

    /// Replaces the text of a message the bot sent earlier.
    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        reply: &FormattedReply,
    ) -> Result<(), TelegramError>;
}
