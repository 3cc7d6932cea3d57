//! Bot abstraction for outbound messages.
//!
//! The trait is transport-agnostic; gatebot-telegram implements it via teloxide
//! and tests substitute a capturing mock.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outbound text formatting mode, mapped to the transport's parse mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formatting {
    Plain,
    Markdown,
    Html,
}

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends a message with an explicit formatting mode.
    async fn send_formatted(&self, chat_id: i64, text: &str, formatting: Formatting) -> Result<()>;
    /// Sends a plain reply into the chat the given message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
}
