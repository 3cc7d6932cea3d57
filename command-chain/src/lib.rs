//! # command-chain
//!
//! Name-keyed command registry and the dispatch chain around it. Middleware run
//! in order (before) ahead of the matched handler; the first `before` returning
//! false stops the chain; after callbacks run in reverse order with the outcome.

use gatebot_core::{BotError, CommandHandler, CommandInvocation, CommandOutcome, Middleware, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Mutable mapping of command name to handler. Clones share the same map, so
/// the registry can keep accepting registrations while polling is running.
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: Arc<RwLock<HashMap<String, Arc<dyn CommandHandler>>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers `handler` for `name` (lowercased). Re-registering a name
    /// replaces the previous handler.
    pub fn add(&self, name: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        let name = name.into().to_ascii_lowercase();
        debug!(command = %name, "Adding command handler");
        if self.handlers.write().insert(name.clone(), handler).is_some() {
            debug!(command = %name, "Replaced existing command handler");
        }
    }

    /// Unregisters the handler for `name`. Fails when the name is not registered.
    pub fn remove(&self, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        debug!(command = %name, "Removing command handler");
        match self.handlers.write().remove(&name) {
            Some(_) => Ok(()),
            None => Err(BotError::UnknownCommand(name)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.read().get(name).cloned()
    }

    /// Sorted snapshot of the registered command names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Chain of middleware around the command registry: middleware run in order
/// (before), then the matched handler; middleware after run in reverse order.
#[derive(Clone)]
pub struct CommandChain {
    middleware: Vec<Arc<dyn Middleware>>,
    registry: CommandRegistry,
}

impl CommandChain {
    /// Creates a chain over `registry` with no middleware.
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            middleware: Vec::new(),
            registry,
        }
    }

    /// Appends a middleware (runs before the handler, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatches one invocation: registry lookup, middleware before, handler,
    /// middleware after in reverse.
    ///
    /// An unregistered command returns [`CommandOutcome::Ignored`] without
    /// running any middleware; only registered commands are gated. The first
    /// middleware whose `before` returns false ends the dispatch with
    /// [`CommandOutcome::Blocked`] and the after phase does not run.
    #[instrument(skip(self, invocation))]
    pub async fn dispatch(&self, invocation: &CommandInvocation) -> Result<CommandOutcome> {
        let Some(handler) = self.registry.get(&invocation.command) else {
            debug!(
                user_id = invocation.message.user.id,
                command = %invocation.command,
                "step: no handler registered, ignoring"
            );
            return Ok(CommandOutcome::Ignored);
        };

        info!(
            user_id = invocation.message.user.id,
            chat_id = invocation.message.chat.id,
            command = %invocation.command,
            "step: command dispatch started"
        );

        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            let should_continue = mw.before(invocation).await?;
            if !should_continue {
                info!(
                    user_id = invocation.message.user.id,
                    middleware = %mw_name,
                    command = %invocation.command,
                    "step: middleware stopped the chain"
                );
                return Ok(CommandOutcome::Blocked);
            }
            debug!(
                user_id = invocation.message.user.id,
                middleware = %mw_name,
                "step: middleware before done"
            );
        }

        let outcome = handler.run(invocation).await?;
        let (outcome_type, reply_len) = match &outcome {
            CommandOutcome::Done => ("Done", None),
            CommandOutcome::Reply(text) => ("Reply", Some(text.len())),
            CommandOutcome::Blocked => ("Blocked", None),
            CommandOutcome::Ignored => ("Ignored", None),
        };
        info!(
            user_id = invocation.message.user.id,
            command = %invocation.command,
            outcome = %outcome_type,
            reply_len = ?reply_len,
            "step: handler done"
        );

        // After callbacks in reverse order (last added runs first here).
        for mw in self.middleware.iter().rev() {
            mw.after(invocation, &outcome).await?;
        }

        info!(
            user_id = invocation.message.user.id,
            command = %invocation.command,
            "step: command dispatch finished"
        );

        Ok(outcome)
    }
}

// Unit/integration tests live in tests/command_chain_test.rs
