//! Per-message handling.

use std::sync::Arc;

use super::routing::{main_keyboard, route, Route};
use crate::error_handling::{ErrorType, InfoType, LookupError, ProcessingStats};
use crate::geo::{FormattedReply, GeoClient, GeoOutcome, SelfIpClient};
use crate::messages;
use crate::telegram::{ChatTransport, Message, ReplyKeyboardMarkup, Update};
use crate::validation::{classify, IpClassification, PublicIp};

/// Routes chat messages through validation and lookup and answers them.
///
/// All collaborators are injected; the dispatcher holds no per-chat state.
pub struct Dispatcher<T> {
    pub(super) transport: T,
    geo: GeoClient,
    self_ip: SelfIpClient,
    pub(super) stats: Arc<ProcessingStats>,
    bot_username: Option<String>,
}

impl<T: ChatTransport> Dispatcher<T> {
    pub fn new(
        transport: T,
        geo: GeoClient,
        self_ip: SelfIpClient,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            transport,
            geo,
            self_ip,
            stats,
            bot_username: None,
        }
    }

    /// Sets the username `/start@name` mentions must match.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handles one update. Updates without a text message are ignored.
    pub async fn handle_update(&self, update: &Update) {
        match &update.message {
            Some(message) if message.text.is_some() => self.handle_message(message).await,
            _ => log::debug!("Ignoring update {} without text", update.update_id),
        }
    }

    /// Handles one text message. Every failure ends in a fixed reply or a log line.
    pub async fn handle_message(&self, message: &Message) {
        let Some(text) = message.text.as_deref() else {
            return;
        };
        log::info!(
            "Message {} from {} in chat {}",
            message.message_id,
            message
                .from
                .as_ref()
                .and_then(|u| u.username.as_deref())
                .unwrap_or("<unknown>"),
            message.chat.id
        );

        match route(text, self.bot_username.as_deref()) {
            Route::Start => {
                self.stats.increment_info(InfoType::StartCommand);
                let keyboard = main_keyboard();
                self.send(
                    message.chat.id,
                    None,
                    FormattedReply::rich(messages::GREETING),
                    Some(&keyboard),
                )
                .await;
            }
            Route::Help => {
                self.stats.increment_info(InfoType::HelpRequested);
                self.reply(message, FormattedReply::rich(messages::HELP))
                    .await;
            }
            Route::OwnIp => {
                self.stats.increment_info(InfoType::OwnIpRequested);
                self.handle_own_ip(message).await;
            }
            Route::Candidate(candidate) => match classify(candidate) {
                IpClassification::Invalid => {
                    self.stats.increment_error(ErrorType::InvalidInput);
                    self.reply(message, FormattedReply::plain(messages::INVALID_IPV4))
                        .await;
                }
                IpClassification::Private => {
                    self.stats.increment_error(ErrorType::PrivateAddress);
                    self.reply(message, FormattedReply::plain(messages::PRIVATE_IPV4))
                        .await;
                }
                IpClassification::Public(ip) => {
                    let placeholder = self
                        .reply(message, FormattedReply::plain(messages::SEARCHING))
                        .await;
                    if let Some(placeholder) = placeholder {
                        let result = self.lookup_reply(&ip).await;
                        self.deliver_result(&placeholder, &result).await;
                    }
                }
            },
        }
    }

    /// Looks up the address the echo service sees and answers with its location.
    async fn handle_own_ip(&self, message: &Message) {
        let ip = match self.self_ip.fetch().await {
            Ok(text) => match classify(&text) {
                IpClassification::Public(ip) => ip,
                other => {
                    log::warn!("Echo service returned unusable address {:?} ({:?})", text, other);
                    self.stats.increment_error(ErrorType::SelfIpLookupError);
                    self.reply(message, FormattedReply::plain(messages::OWN_IP_UNAVAILABLE))
                        .await;
                    return;
                }
            },
            Err(LookupError::Status(code)) => {
                log::warn!("Echo service answered HTTP {}", code);
                self.stats.increment_error(ErrorType::SelfIpLookupError);
                self.reply(message, FormattedReply::plain(messages::OWN_IP_UNAVAILABLE))
                    .await;
                return;
            }
            Err(e) => {
                log::warn!("Echo service lookup failed: {}", e);
                self.stats.increment_error(ErrorType::SelfIpLookupError);
                self.reply(message, FormattedReply::plain(messages::OWN_IP_FAILURE))
                    .await;
                return;
            }
        };

        let placeholder = self
            .reply(
                message,
                FormattedReply::rich(messages::searching_own_ip(ip.as_str())),
            )
            .await;
        if let Some(placeholder) = placeholder {
            let result = self.lookup_reply(&ip).await;
            self.deliver_result(&placeholder, &result).await;
        }
    }

    /// Runs the lookup, records its outcome and formats the reply.
    async fn lookup_reply(&self, ip: &PublicIp) -> FormattedReply {
        self.geo
            .lookup_and_format_observed(ip, |outcome| self.record_lookup(outcome))
            .await
    }

    fn record_lookup(&self, outcome: &Result<GeoOutcome, LookupError>) {
        match outcome {
            Ok(GeoOutcome::Located(_)) => self.stats.increment_info(InfoType::LookupSucceeded),
            Ok(GeoOutcome::ServiceFailure { .. }) => {
                self.stats.increment_error(ErrorType::GeoServiceFailure)
            }
            Err(e) => self.stats.increment_error(e.error_type()),
        }
    }

    /// Edits the placeholder into the final reply, falling back to a plain
    /// "could not display" text when Telegram rejects the edit.
    async fn deliver_result(&self, placeholder: &Message, result: &FormattedReply) {
        let chat_id = placeholder.chat.id;
        let Err(e) = self
            .transport
            .edit_message_text(chat_id, placeholder.message_id, result)
            .await
        else {
            return;
        };

        log::warn!("Failed to deliver result to chat {}: {}", chat_id, e);
        self.stats.increment_error(ErrorType::ReplyDeliveryError);

        let fallback = FormattedReply::plain(messages::DISPLAY_FAILURE);
        if let Err(e) = self
            .transport
            .edit_message_text(chat_id, placeholder.message_id, &fallback)
            .await
        {
            log::warn!("Fallback edit in chat {} failed as well: {}", chat_id, e);
        }
    }

    async fn reply(&self, message: &Message, reply: FormattedReply) -> Option<Message> {
        self.send(message.chat.id, Some(message.message_id), reply, None)
            .await
    }

    async fn send(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        reply: FormattedReply,
        keyboard: Option<&ReplyKeyboardMarkup>,
    ) -> Option<Message> {
        match self
            .transport
            .send_message(chat_id, reply_to, &reply, keyboard)
            .await
        {
            Ok(sent) => Some(sent),
            Err(e) => {
                log::warn!("Failed to send message to chat {}: {}", chat_id, e);
                self.stats.increment_error(ErrorType::ReplyDeliveryError);
                None
            }
        }
    }
}
