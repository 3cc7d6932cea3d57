//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gatebot_telegram::TelegramConfig;

#[derive(Parser)]
#[command(name = "gatebot")]
#[command(about = "Admin-gated Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token and owner can override BOT_TOKEN / OWNER_ID).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long)]
        owner: Option<i64>,
    },
}

/// Loads TelegramConfig from the environment. CLI arguments override the
/// corresponding BOT_TOKEN / OWNER_ID variables.
pub fn load_config(token: Option<String>, owner: Option<i64>) -> Result<TelegramConfig> {
    TelegramConfig::load(token, owner)
}
