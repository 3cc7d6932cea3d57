//! Core types: user, chat, message, command invocation, and the handler/middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names, bot flag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

/// Chat (group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    pub fn new(id: i64, chat_type: impl Into<String>) -> Self {
        Self {
            id,
            chat_type: chat_type.into(),
        }
    }

    /// A private (one-to-one) chat, the destination kind for owner notifications.
    pub fn private(id: i64) -> Self {
        Self::new(id, "private")
    }
}

/// A single incoming message with user, chat, and text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A parsed command: name, remaining argument text, and the triggering message.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub command: String,
    pub args: String,
    pub message: Message,
}

impl CommandInvocation {
    /// Parses a message into a command invocation.
    ///
    /// The content must start with `/`; the first token (without the slash,
    /// lowercased) is the command name and the trimmed remainder is `args`.
    /// A `/name@target` addressed to a different bot username yields `None`;
    /// when our own username is not yet known, addressed commands are
    /// delivered anyway.
    pub fn parse(message: &Message, bot_username: Option<&str>) -> Option<Self> {
        let text = message.content.trim();
        let rest = text.strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        if let (Some(target), Some(username)) = (target, bot_username) {
            if !target.eq_ignore_ascii_case(username) {
                return None;
            }
        }
        Some(Self {
            command: name.to_ascii_lowercase(),
            args: args.to_string(),
            message: message.clone(),
        })
    }
}

/// Result of dispatching a command through the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The handler ran and has nothing to send back.
    Done,
    /// The handler ran and wants this text sent as a reply.
    Reply(String),
    /// A middleware stopped the chain before the handler ran.
    Blocked,
    /// No handler is registered for the command; nothing ran.
    Ignored,
}

/// A registered command callback.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, invocation: &CommandInvocation) -> crate::error::Result<CommandOutcome>;
}

/// Interceptor applied uniformly around every registered command.
///
/// `before` runs in registration order; returning false stops the chain and the
/// handler does not run. `after` runs in reverse order with the final outcome.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Runs before the command handler. Return false to stop the chain.
    async fn before(&self, _invocation: &CommandInvocation) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Runs after the command handler (reverse order), with the final outcome.
    async fn after(
        &self,
        _invocation: &CommandInvocation,
        _outcome: &CommandOutcome,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 7,
                username: Some("someone".to_string()),
                first_name: Some("Some".to_string()),
                last_name: None,
                is_bot: false,
            },
            chat: Chat::private(7),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_plain_command() {
        let inv = CommandInvocation::parse(&message("/start"), None).unwrap();
        assert_eq!(inv.command, "start");
        assert_eq!(inv.args, "");
    }

    #[test]
    fn test_parse_command_with_args() {
        let inv = CommandInvocation::parse(&message("/echo hello  world"), None).unwrap();
        assert_eq!(inv.command, "echo");
        assert_eq!(inv.args, "hello  world");
    }

    #[test]
    fn test_parse_lowercases_name() {
        let inv = CommandInvocation::parse(&message("/Ping"), None).unwrap();
        assert_eq!(inv.command, "ping");
    }

    #[test]
    fn test_parse_addressed_to_us() {
        let inv = CommandInvocation::parse(&message("/ping@GateBot"), Some("gatebot")).unwrap();
        assert_eq!(inv.command, "ping");
    }

    #[test]
    fn test_parse_addressed_to_another_bot() {
        assert!(CommandInvocation::parse(&message("/ping@otherbot"), Some("gatebot")).is_none());
    }

    #[test]
    fn test_parse_addressed_with_unknown_own_username() {
        // Username not resolved yet: deliver rather than drop.
        let inv = CommandInvocation::parse(&message("/ping@otherbot"), None).unwrap();
        assert_eq!(inv.command, "ping");
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert!(CommandInvocation::parse(&message("hello"), None).is_none());
        assert!(CommandInvocation::parse(&message("/"), None).is_none());
        assert!(CommandInvocation::parse(&message(""), None).is_none());
    }
}
