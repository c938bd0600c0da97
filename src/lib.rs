//! ip_geo_bot library: a Telegram bot that reports where a public IPv4 address is.
//!
//! A user sends an address; the bot checks that it looks like IPv4 and is not in
//! a private range, asks the geolocation API about it, and edits a
//! "searching…" placeholder into the country, city, region and a map link.
//! A tiny HTTP server answers liveness probes alongside.
//!
//! # Example
//!
//! ```no_run
//! use ip_geo_bot::{run_bot, BotToken, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     bot_token: Some(BotToken::new("123456:ABC")),
//!     ..Default::default()
//! };
//! run_bot(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The validation and formatting core can be used without Telegram:
//!
//! ```
//! use ip_geo_bot::{classify, IpClassification};
//!
//! assert_eq!(classify("10.1.2.3"), IpClassification::Private);
//! ```

mod app;
pub mod config;
pub mod dispatch;
pub mod error_handling;
pub mod geo;
pub mod initialization;
pub mod keep_alive;
pub mod messages;
pub mod telegram;
mod validation;

// Re-export public API
pub use config::{BotToken, Config, ConfigValidationError, LogFormat, LogLevel};
pub use dispatch::Dispatcher;
pub use geo::{FormattedReply, GeoClient, GeoOutcome, GeoResult, SelfIpClient};
pub use run::run_bot;
pub use validation::{classify, IpClassification, PublicIp};

// Internal run module (wires the components together)
mod run {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::cancel_on_ctrl_c;
    use crate::config::Config;
    use crate::dispatch::Dispatcher;
    use crate::error_handling::ProcessingStats;
    use crate::geo::{GeoClient, SelfIpClient};
    use crate::initialization::init_client;
    use crate::keep_alive::{spawn_keep_alive_server, KeepAliveState};
    use crate::telegram::BotApi;

    /// Runs the bot until Ctrl-C.
    ///
    /// Starts the keep-alive server (unless disabled), then long-polls Telegram
    /// and answers messages one at a time.
    ///
    /// # Errors
    ///
    /// Fails before any network activity when the configuration is invalid,
    /// in particular when no bot token is set, or when the HTTP client cannot be
    /// built. Everything after startup is recovered and logged.
    pub async fn run_bot(config: Config) -> Result<()> {
        config.validate().context("Invalid configuration")?;
        let token = config
            .bot_token
            .as_ref()
            .context("Bot token not found")?;

        let client = init_client().context("Failed to initialize HTTP client")?;
        let stats = Arc::new(ProcessingStats::new());

        if config.no_keep_alive {
            info!("Keep-alive server disabled");
        } else {
            let addr = SocketAddr::new(config.keep_alive_host, config.keep_alive_port);
            spawn_keep_alive_server(addr, KeepAliveState::new(Arc::clone(&stats)));
        }

        let api = BotApi::new(Arc::clone(&client), &config.telegram_api_url, token);
        let username = match api.get_me().await {
            Ok(me) => {
                info!(
                    "Bot @{} (id {}) is up and polling",
                    me.username.as_deref().unwrap_or("?"),
                    me.id
                );
                me.username
            }
            Err(e) => {
                warn!("Could not verify the bot token: {}", e);
                None
            }
        };

        let mut dispatcher = Dispatcher::new(
            api,
            GeoClient::from_config(Arc::clone(&client), &config),
            SelfIpClient::from_config(client, &config),
            stats,
        );
        if let Some(username) = username {
            dispatcher = dispatcher.with_bot_username(username);
        }

        let shutdown = CancellationToken::new();
        cancel_on_ctrl_c(shutdown.clone());

        dispatcher
            .run_polling(config.poll_timeout_seconds, shutdown)
            .await;

        info!("Bot stopped");
        Ok(())
    }
}
