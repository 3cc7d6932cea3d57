//! Built-in commands registered by `gatebot run`.

use async_trait::async_trait;
use gatebot_core::{AdminSet, CommandHandler, CommandInvocation, CommandOutcome, Result};

/// `/ping` — liveness check, replies `pong`.
pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn run(&self, _invocation: &CommandInvocation) -> Result<CommandOutcome> {
        Ok(CommandOutcome::Reply("pong".to_string()))
    }
}

/// `/admins` — replies with the current admin ids, one per line.
pub struct AdminsCommand {
    admins: AdminSet,
}

impl AdminsCommand {
    pub fn new(admins: AdminSet) -> Self {
        Self { admins }
    }
}

#[async_trait]
impl CommandHandler for AdminsCommand {
    async fn run(&self, _invocation: &CommandInvocation) -> Result<CommandOutcome> {
        let lines: Vec<String> = self
            .admins
            .ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        Ok(CommandOutcome::Reply(lines.join("\n")))
    }
}
