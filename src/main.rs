//! Main application entry point (bot binary).
//!
//! This is a thin wrapper around the `ip_geo_bot` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - The fatal missing-token check
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_geo_bot::initialization::init_logger_with;
use ip_geo_bot::{run_bot, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load BOT_TOKEN and friends from .env: current directory first, then next
    // to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    // Nothing may listen on the network before the token is known to be present
    if let Err(e) = config.validate() {
        log::error!("{}", e);
        eprintln!("ip_geo_bot error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run_bot(config).await {
        eprintln!("ip_geo_bot error: {:#}", e);
        process::exit(1);
    }

    Ok(())
}
