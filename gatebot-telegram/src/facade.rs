//! The bot facade: lifecycle, handler registration, admin management, and
//! send helpers over the underlying teloxide client.

use crate::bot_adapter::TelegramBotAdapter;
use crate::config::TelegramConfig;
use crate::dispatch::Dispatch;
use crate::runner::run_polling;
use command_chain::{CommandChain, CommandRegistry};
use gatebot_core::{
    AdminSet, Bot, BotError, CommandHandler, ErrorHandler, ErrorHandlerRegistry, Formatting,
    LogErrorHandler, Message, Result,
};
use middleware::{AuthMiddleware, LoggingMiddleware};
use parking_lot::Mutex;
use std::sync::Arc;
use teloxide::dispatching::ShutdownToken;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Convenience wrapper around the Telegram client: owns the admin allow-list,
/// the command registry, and the error handlers, and exposes
/// start/stop/send helpers.
///
/// Every registered command is dispatched through [`LoggingMiddleware`] and
/// [`AuthMiddleware`], so only users in the admin set can trigger handlers.
/// The owner passed in the config is the first admin and the default
/// destination for [`BotFacade::send_message`].
///
/// The token is not validated locally; an invalid token surfaces from the
/// underlying client as [`BotError::Transport`] on [`BotFacade::start`] or on
/// the first send.
pub struct BotFacade {
    config: TelegramConfig,
    tg: teloxide::Bot,
    bot: Arc<dyn Bot>,
    admins: AdminSet,
    registry: CommandRegistry,
    error_handlers: ErrorHandlerRegistry,
    dispatch: Arc<Dispatch>,
    bot_username: Arc<RwLock<Option<String>>>,
    shutdown: Mutex<Option<ShutdownToken>>,
}

impl BotFacade {
    /// Creates the facade with the default error handler registered under `"log"`.
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let error_handlers = ErrorHandlerRegistry::new();
        error_handlers.add("log", Arc::new(LogErrorHandler));
        Self::build(config, error_handlers, None)
    }

    /// Creates the facade with a caller-provided error handler instead of the
    /// default one.
    pub fn with_error_handler(
        config: TelegramConfig,
        key: &str,
        handler: Arc<dyn ErrorHandler>,
    ) -> Result<Self> {
        let error_handlers = ErrorHandlerRegistry::new();
        error_handlers.add(key, handler);
        Self::build(config, error_handlers, None)
    }

    /// Creates the facade with a substitute send transport (for tests).
    #[doc(hidden)]
    pub fn with_bot_override(config: TelegramConfig, bot: Arc<dyn Bot>) -> Result<Self> {
        let error_handlers = ErrorHandlerRegistry::new();
        error_handlers.add("log", Arc::new(LogErrorHandler));
        Self::build(config, error_handlers, Some(bot))
    }

    fn build(
        config: TelegramConfig,
        error_handlers: ErrorHandlerRegistry,
        bot_override: Option<Arc<dyn Bot>>,
    ) -> Result<Self> {
        let mut tg = teloxide::Bot::new(config.bot_token.clone());
        if let Some(url) = &config.telegram_api_url {
            let url = reqwest::Url::parse(url)
                .map_err(|e| BotError::Config(format!("Invalid Telegram API URL: {}", e)))?;
            tg = tg.set_api_url(url);
        }

        let bot: Arc<dyn Bot> = match bot_override {
            Some(bot) => bot,
            None => Arc::new(TelegramBotAdapter::new(tg.clone())),
        };

        let admins = AdminSet::new(config.owner_id);
        let registry = CommandRegistry::new();
        let chain = CommandChain::new(registry.clone())
            .add_middleware(Arc::new(LoggingMiddleware))
            .add_middleware(Arc::new(AuthMiddleware::new(admins.clone())));

        let bot_username = Arc::new(RwLock::new(None));
        let dispatch = Arc::new(Dispatch::new(
            chain,
            bot.clone(),
            error_handlers.clone(),
            bot_username.clone(),
        ));

        Ok(Self {
            config,
            tg,
            bot,
            admins,
            registry,
            error_handlers,
            dispatch,
            bot_username,
            shutdown: Mutex::new(None),
        })
    }

    /// Begins receiving updates; blocks until [`BotFacade::stop`] is called
    /// from another task (or the process receives Ctrl-C).
    ///
    /// Resolves the bot's own username first so commands addressed as
    /// `/name@botusername` are matched; an invalid token fails here.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        info!("Starting bot");
        let me = self
            .tg
            .get_me()
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        if let Some(username) = &me.user.username {
            *self.bot_username.write().await = Some(username.clone());
            info!(username = %username, "Bot identity resolved");
        }
        run_polling(self.tg.clone(), self.dispatch.clone(), &self.shutdown).await
    }

    /// Signals the polling loop to terminate and waits until it has wound
    /// down. Fails with [`BotError::NotRunning`] when polling is not active.
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping bot");
        let token = self.shutdown.lock().take().ok_or(BotError::NotRunning)?;
        let wait = token.shutdown().map_err(|_| BotError::NotRunning)?;
        wait.await;
        Ok(())
    }

    /// Registers `handler` for command `name`; a previously registered
    /// handler under the same name is replaced.
    pub fn add_command(&self, name: &str, handler: Arc<dyn CommandHandler>) {
        self.registry.add(name, handler);
    }

    /// Unregisters the handler for `name`.
    pub fn remove_command(&self, name: &str) -> Result<()> {
        self.registry.remove(name)
    }

    /// Sorted snapshot of the registered command names.
    pub fn commands(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Registers an additional error handler under `key`. All registered
    /// handlers fire for every error; remove the default `"log"` handler
    /// first if it should not.
    pub fn add_error_handler(&self, key: &str, handler: Arc<dyn ErrorHandler>) {
        self.error_handlers.add(key, handler);
    }

    pub fn remove_error_handler(&self, key: &str) -> Result<()> {
        self.error_handlers.remove(key)
    }

    /// Sends a Markdown-formatted message to the owner.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        self.send_message_to(self.config.owner_id, text, Formatting::Markdown)
            .await
    }

    /// Sends a message to an explicit destination chat with the given
    /// formatting mode. Transport failures are propagated untranslated.
    pub async fn send_message_to(
        &self,
        chat_id: i64,
        text: &str,
        formatting: Formatting,
    ) -> Result<()> {
        self.bot.send_formatted(chat_id, text, formatting).await
    }

    /// Grants admin rights to `id`.
    pub fn add_admin(&self, id: i64) {
        self.admins.add(id);
    }

    /// Revokes admin rights from `id`; fails when `id` is not an admin.
    pub fn remove_admin(&self, id: i64) -> Result<()> {
        self.admins.remove(id)
    }

    /// Live view of the admin allow-list (shared with the auth middleware).
    pub fn admin_set(&self) -> AdminSet {
        self.admins.clone()
    }

    pub fn owner_id(&self) -> i64 {
        self.config.owner_id
    }

    /// Drives the dispatch pipeline with an already-converted message
    /// (callable from tests).
    #[doc(hidden)]
    pub async fn handle_core_message(&self, message: &Message) {
        self.dispatch.handle(message).await;
    }
}
