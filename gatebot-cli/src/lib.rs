//! # gatebot-cli
//!
//! CLI foundation: argument parsing, config loading, built-in commands.

pub mod cli;
pub mod commands;

pub use cli::{load_config, Cli, Commands};
pub use commands::{AdminsCommand, PingCommand};
pub use gatebot_telegram::TelegramConfig;
