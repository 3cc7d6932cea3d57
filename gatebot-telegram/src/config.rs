//! Minimal configuration: owner id, token, API URL, log path.
//! Loaded from the environment: OWNER_ID, BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE.

use anyhow::Result;
use std::env;

/// Bot configuration (Telegram access, owner identity, and logging only).
///
/// The token is held for the lifetime of the process and is never logged.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// The bot owner's Telegram user id: the first admin and the default
    /// destination for outbound messages.
    pub owner_id: i64,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from environment variables: BOT_TOKEN and OWNER_ID are required,
    /// TELEGRAM_API_URL (falling back to TELOXIDE_API_URL) and LOG_FILE optional.
    /// Explicit `token` / `owner` values take precedence over the environment.
    pub fn load(token: Option<String>, owner: Option<i64>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let owner_id = match owner {
            Some(owner) => owner,
            None => env::var("OWNER_ID")
                .map_err(|_| anyhow::anyhow!("OWNER_ID not set"))?
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("OWNER_ID must be an integer user id: {}", e))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            owner_id,
            telegram_api_url,
            log_file,
        })
    }

    /// Loads from the environment only, with no overrides.
    pub fn from_env() -> Result<Self> {
        Self::load(None, None)
    }

    /// Constructs with the given token and owner, everything else None.
    pub fn with_token_and_owner(bot_token: impl Into<String>, owner_id: i64) -> Self {
        Self {
            bot_token: bot_token.into(),
            owner_id,
            telegram_api_url: None,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_with_token_and_owner() {
        let config = TelegramConfig::with_token_and_owner("test_token", 42);
        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.owner_id, 42);
        assert!(config.telegram_api_url.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("OWNER_ID", "77");
        env::remove_var("TELEGRAM_API_URL");
        env::remove_var("TELOXIDE_API_URL");
        env::remove_var("LOG_FILE");

        let config = TelegramConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "env_token");
        assert_eq!(config.owner_id, 77);
        assert!(config.telegram_api_url.is_none());

        env::remove_var("BOT_TOKEN");
        env::remove_var("OWNER_ID");
    }

    #[test]
    #[serial]
    fn test_load_overrides_take_precedence() {
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("OWNER_ID", "77");

        let config = TelegramConfig::load(Some("cli_token".to_string()), Some(5)).unwrap();
        assert_eq!(config.bot_token, "cli_token");
        assert_eq!(config.owner_id, 5);

        env::remove_var("BOT_TOKEN");
        env::remove_var("OWNER_ID");
    }

    #[test]
    #[serial]
    fn test_load_overrides_without_env() {
        env::remove_var("BOT_TOKEN");
        env::remove_var("OWNER_ID");

        let config = TelegramConfig::load(Some("cli_token".to_string()), Some(5)).unwrap();
        assert_eq!(config.bot_token, "cli_token");
        assert_eq!(config.owner_id, 5);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_owner() {
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("OWNER_ID", "not-a-number");

        assert!(TelegramConfig::from_env().is_err());

        env::remove_var("BOT_TOKEN");
        env::remove_var("OWNER_ID");
    }

    #[test]
    #[serial]
    fn test_from_env_requires_owner() {
        env::set_var("BOT_TOKEN", "env_token");
        env::remove_var("OWNER_ID");

        assert!(TelegramConfig::from_env().is_err());

        env::remove_var("BOT_TOKEN");
    }
}
