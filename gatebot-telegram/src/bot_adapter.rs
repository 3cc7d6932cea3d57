//! Wraps teloxide::Bot and implements [`gatebot_core::Bot`]. Production code
//! sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use gatebot_core::{Bot as CoreBot, BotError, Formatting, Message, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

/// Thin wrapper around teloxide::Bot that implements gatebot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_formatted(&self, chat_id: i64, text: &str, formatting: Formatting) -> Result<()> {
        let request = self.bot.send_message(ChatId(chat_id), text);
        let request = match formatting {
            Formatting::Plain => request,
            Formatting::Markdown => request.parse_mode(ParseMode::Markdown),
            Formatting::Html => request.parse_mode(ParseMode::Html),
        };
        request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(message.chat.id, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_bot_adapter_new() {
        let bot = teloxide::Bot::new("dummy_token");
        let adapter = TelegramBotAdapter::new(bot);
        let _ = adapter.inner();
    }
}
