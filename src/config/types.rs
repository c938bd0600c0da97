//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through the environment
//! (a `.env` file is loaded by the binary before parsing).

use std::convert::Infallible;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    DEFAULT_GEO_API_URL, DEFAULT_GEO_LANG, DEFAULT_KEEP_ALIVE_HOST, DEFAULT_KEEP_ALIVE_PORT,
    DEFAULT_SELF_IP_URL, DEFAULT_TELEGRAM_API_URL, GEO_TIMEOUT_SECS, MAX_POLL_TIMEOUT_SECS,
    POLL_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Telegram bot authentication token.
///
/// The token grants full control over the bot, so `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(***)")
    }
}

impl FromStr for BotToken {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// A configuration value that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid configuration for `{field}`: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Bot configuration.
///
/// Parsed from the command line with environment fallbacks. The library can
/// also construct it programmatically.
///
/// # Examples
///
/// ```no_run
/// use ip_geo_bot::{BotToken, Config};
///
/// let config = Config {
///     bot_token: Some(BotToken::new("123456:ABC")),
///     keep_alive_port: 3000,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ip_geo_bot",
    about = "Telegram bot that reports the geolocation of public IPv4 addresses."
)]
pub struct Config {
    /// Telegram bot token (required)
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<BotToken>,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API_URL)]
    pub telegram_api_url: String,

    /// Geolocation API base URL; the IP is appended to it
    #[arg(long, env = "GEO_API_URL", default_value = DEFAULT_GEO_API_URL)]
    pub geo_api_url: String,

    /// Language requested from the geolocation API
    #[arg(long, env = "GEO_LANG", default_value = DEFAULT_GEO_LANG)]
    pub geo_lang: String,

    /// Geolocation request timeout in seconds
    #[arg(long, default_value_t = GEO_TIMEOUT_SECS)]
    pub geo_timeout_seconds: u64,

    /// Public-IP echo service used by the "send my IP" button
    #[arg(long, env = "SELF_IP_URL", default_value = DEFAULT_SELF_IP_URL)]
    pub self_ip_url: String,

    /// Long-poll timeout for getUpdates in seconds
    #[arg(long, default_value_t = POLL_TIMEOUT_SECS)]
    pub poll_timeout_seconds: u64,

    /// Address the keep-alive server binds to
    #[arg(long, default_value = DEFAULT_KEEP_ALIVE_HOST)]
    pub keep_alive_host: IpAddr,

    /// Port the keep-alive server listens on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_KEEP_ALIVE_PORT)]
    pub keep_alive_port: u16,

    /// Do not start the keep-alive server
    #[arg(long)]
    pub no_keep_alive: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            geo_api_url: DEFAULT_GEO_API_URL.to_string(),
            geo_lang: DEFAULT_GEO_LANG.to_string(),
            geo_timeout_seconds: GEO_TIMEOUT_SECS,
            self_ip_url: DEFAULT_SELF_IP_URL.to_string(),
            poll_timeout_seconds: POLL_TIMEOUT_SECS,
            keep_alive_host: IpAddr::from([0, 0, 0, 0]),
            keep_alive_port: DEFAULT_KEEP_ALIVE_PORT,
            no_keep_alive: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks the configuration before anything touches the network.
    ///
    /// # Errors
    ///
    /// Returns the first offending option. A missing or blank bot token is
    /// always an error: the bot cannot start without it.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match &self.bot_token {
            None => {
                return Err(ConfigValidationError::new(
                    "bot_token",
                    "bot token not found; set BOT_TOKEN in the environment or in .env",
                ))
            }
            Some(token) if token.is_blank() => {
                return Err(ConfigValidationError::new(
                    "bot_token",
                    "bot token is empty; set BOT_TOKEN in the environment or in .env",
                ))
            }
            Some(_) => {}
        }

        if self.geo_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "geo_timeout_seconds",
                "must be greater than 0",
            ));
        }

        if self.poll_timeout_seconds == 0 || self.poll_timeout_seconds > MAX_POLL_TIMEOUT_SECS {
            return Err(ConfigValidationError::new(
                "poll_timeout_seconds",
                format!("must be between 1 and {MAX_POLL_TIMEOUT_SECS}"),
            ));
        }

        for (field, url) in [
            ("telegram_api_url", &self.telegram_api_url),
            ("geo_api_url", &self.geo_api_url),
            ("self_ip_url", &self.self_ip_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigValidationError::new(
                    field,
                    format!("expected an http:// or https:// URL, got '{url}'"),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            bot_token: Some(BotToken::new("123456:ABC-DEF")),
            ..Default::default()
        }
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.bot_token.is_none());
        assert_eq!(config.geo_api_url, "http://ip-api.com/json/");
        assert_eq!(config.geo_lang, "ru");
        assert_eq!(config.geo_timeout_seconds, 10);
        assert_eq!(config.keep_alive_port, 8080);
        assert_eq!(config.keep_alive_host.to_string(), "0.0.0.0");
        assert!(!config.no_keep_alive);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = Config::default().validate().unwrap_err();
        assert_eq!(err.field, "bot_token");
        assert!(err.message.contains("BOT_TOKEN"));
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let config = Config {
            bot_token: Some(BotToken::new("   ")),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "bot_token");
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_poll_timeout_bounds() {
        let mut config = valid_config();
        config.poll_timeout_seconds = 0;
        assert_eq!(
            config.validate().unwrap_err().field,
            "poll_timeout_seconds"
        );
        config.poll_timeout_seconds = 51;
        assert_eq!(
            config.validate().unwrap_err().field,
            "poll_timeout_seconds"
        );
        config.poll_timeout_seconds = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let mut config = valid_config();
        config.geo_api_url = "ftp://ip-api.com/json/".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "geo_api_url");
        assert!(err.message.contains("ftp://"));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let config = valid_config();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("123456:ABC-DEF"));
        assert!(debug.contains("BotToken(***)"));
    }

    #[test]
    fn test_cli_parsing_reads_token_flag() {
        let config =
            Config::try_parse_from(["ip_geo_bot", "--bot-token", "42:xyz", "--keep-alive-port", "9000"])
                .expect("arguments should parse");
        assert_eq!(config.bot_token.as_ref().map(BotToken::expose), Some("42:xyz"));
        assert_eq!(config.keep_alive_port, 9000);
    }
}
