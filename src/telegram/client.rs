//! Telegram Bot API client over reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::transport::ChatTransport;
use super::types::{
    ApiResponse, BotUser, EditMessageTextParams, GetUpdatesParams, LinkPreviewOptions, Message,
    ReplyKeyboardMarkup, ReplyParameters, SendMessageParams, Update,
};
use crate::config::{BotToken, POLL_REQUEST_GRACE, TELEGRAM_REQUEST_TIMEOUT};
use crate::error_handling::TelegramError;
use crate::geo::FormattedReply;

const PARSE_MODE_HTML: &str = "HTML";
const ALLOWED_UPDATES: &[&str] = &["message"];

/// Bot API client bound to one bot token.
///
/// The token is part of every request URL, so transport errors are stripped of
/// their URL before they are returned.
#[derive(Clone)]
pub struct BotApi {
    http: Arc<reqwest::Client>,
    base: String,
}

impl BotApi {
    pub fn new(http: Arc<reqwest::Client>, api_url: &str, token: &BotToken) -> Self {
        Self {
            http,
            base: format!("{}/bot{}", api_url.trim_end_matches('/'), token.expose()),
        }
    }

    /// Calls `method` with JSON `params` and unwraps the `result` field.
    async fn call<P, R>(
        &self,
        method: &'static str,
        params: &P,
        timeout: Duration,
    ) -> Result<R, TelegramError>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{}", self.base, method))
            .json(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TelegramError::Transport(e.without_url()))?;

        // Telegram answers errors with a JSON envelope too, whatever the status
        let envelope: ApiResponse<R> = response
            .json()
            .await
            .map_err(|e| TelegramError::Transport(e.without_url()))?;

        if !envelope.ok {
            return Err(TelegramError::Api {
                code: envelope.error_code,
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("{method} failed")),
            });
        }

        envelope.result.ok_or(TelegramError::MissingResult(method))
    }

    /// Returns the bot's own account; used at startup to check the token.
    pub async fn get_me(&self) -> Result<BotUser, TelegramError> {
        self.call("getMe", &serde_json::json!({}), TELEGRAM_REQUEST_TIMEOUT)
            .await
    }
}

fn rich_options(reply: &FormattedReply) -> (Option<&'static str>, Option<LinkPreviewOptions>) {
    if reply.rich {
        (
            Some(PARSE_MODE_HTML),
            Some(LinkPreviewOptions { is_disabled: true }),
        )
    } else {
        (None, None)
    }
}

#[async_trait]
impl ChatTransport for BotApi {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call(
            "getUpdates",
            &params,
            Duration::from_secs(timeout_secs) + POLL_REQUEST_GRACE,
        )
        .await
    }

    async fn send_message(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        reply: &FormattedReply,
        keyboard: Option<&ReplyKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let (parse_mode, link_preview_options) = rich_options(reply);
        let params = SendMessageParams {
            chat_id,
            text: &reply.text,
            parse_mode,
            link_preview_options,
            reply_parameters: reply_to.map(|message_id| ReplyParameters { message_id }),
            reply_markup: keyboard,
        };
        self.call("sendMessage", &params, TELEGRAM_REQUEST_TIMEOUT)
            .await
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        reply: &FormattedReply,
    ) -> Result<(), TelegramError> {
        let (parse_mode, link_preview_options) = rich_options(reply);
        let params = EditMessageTextParams {
            chat_id,
            message_id,
            text: &reply.text,
            parse_mode,
            link_preview_options,
        };
        // The result is the edited Message, or `true` for inline messages
        let _: serde_json::Value = self
            .call("editMessageText", &params, TELEGRAM_REQUEST_TIMEOUT)
            .await?;
        Ok(())
    }
}
