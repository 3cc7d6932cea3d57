//! Per-message dispatch: parse the command, run the chain, send the reply,
//! fan errors out to the registered error handlers.

use command_chain::CommandChain;
use gatebot_core::{Bot, CommandInvocation, CommandOutcome, ErrorHandlerRegistry, Message};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Message-processing pipeline shared by the polling runner and by tests that
/// drive it directly with core messages.
pub struct Dispatch {
    chain: CommandChain,
    bot: Arc<dyn Bot>,
    error_handlers: ErrorHandlerRegistry,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl Dispatch {
    pub fn new(
        chain: CommandChain,
        bot: Arc<dyn Bot>,
        error_handlers: ErrorHandlerRegistry,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            chain,
            bot,
            error_handlers,
            bot_username,
        }
    }

    /// Handles one incoming message.
    ///
    /// Non-command messages and commands addressed to other bots are dropped
    /// with a debug log. Reply outcomes go back into the originating chat.
    /// Errors raised by the chain or the send are not returned; every
    /// registered error handler is notified instead.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) {
        let bot_username = self.bot_username.read().await.clone();
        let Some(invocation) = CommandInvocation::parse(message, bot_username.as_deref()) else {
            debug!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Ignoring non-command message"
            );
            return;
        };

        match self.chain.dispatch(&invocation).await {
            Ok(CommandOutcome::Reply(text)) => {
                if let Err(e) = self.bot.reply_to(message, &text).await {
                    self.error_handlers.notify(Some(message), &e).await;
                }
            }
            Ok(_) => {}
            Err(e) => {
                self.error_handlers.notify(Some(message), &e).await;
            }
        }
    }
}
