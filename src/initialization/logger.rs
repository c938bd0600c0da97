//! Logger initialization.

use std::io::Write;

use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies whose debug output drowns the bot's own lines.
const CHATTY_DEPENDENCIES: &[&str] = &["reqwest", "hyper_util"];

/// Installs `env_logger` with the bot's line format.
///
/// `RUST_LOG` is read first; `level` then applies to this crate and as the
/// default for everything else. HTTP client internals stay at Info at most.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=ip_geo_bot=debug ip_geo_bot --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for module in CHATTY_DEPENDENCIES {
        builder.filter_module(module, level.min(LevelFilter::Info));
    }
    builder.filter_module(env!("CARGO_CRATE_NAME"), level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            let line = json_line(Utc::now(), record.level(), record.target(), record.args());
            writeln!(buf, "{line}")
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            let line = plain_line(Utc::now(), record.level(), record.target(), record.args());
            writeln!(buf, "{line}")
        }),
    };

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One JSON object per record; `ts` is RFC 3339 with milliseconds.
fn json_line(
    now: DateTime<Utc>,
    level: Level,
    target: &str,
    message: &std::fmt::Arguments<'_>,
) -> String {
    serde_json::json!({
        "ts": now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": level.as_str(),
        "target": target,
        "msg": message.to_string(),
    })
    .to_string()
}

/// `HH:MM:SS.mmm LEVEL target: message`, with the level colored.
fn plain_line(
    now: DateTime<Utc>,
    level: Level,
    target: &str,
    message: &std::fmt::Arguments<'_>,
) -> String {
    let label = format!("{:<5}", level.as_str());
    let label = match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.dimmed(),
    };
    format!(
        "{} {} {}: {}",
        now.format("%H:%M:%S%.3f"),
        label,
        target.cyan(),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_json_line_fields() {
        let line = json_line(
            noon(),
            Level::Warn,
            "ip_geo_bot::geo",
            &format_args!("lookup for {} failed: \"timeout\"", "8.8.8.8"),
        );
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
        assert_eq!(value["ts"], "2024-05-01T12:00:00.000Z");
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "ip_geo_bot::geo");
        assert_eq!(value["msg"], "lookup for 8.8.8.8 failed: \"timeout\"");
    }

    #[test]
    fn test_plain_line_layout() {
        colored::control::set_override(false);
        let line = plain_line(noon(), Level::Info, "ip_geo_bot", &format_args!("Bot stopped"));
        assert_eq!(line, "12:00:00.000 INFO  ip_geo_bot: Bot stopped");
    }

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        // The second installation must be reported, not panic
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
