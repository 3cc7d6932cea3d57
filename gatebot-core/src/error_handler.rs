//! Error handlers: callbacks notified when dispatching a message fails.

use crate::error::{BotError, Result};
use crate::types::Message;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback invoked for every error raised while handling an update.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn handle_error(&self, message: Option<&Message>, error: &BotError);
}

/// Default error handler: logs the failing update and the error as a warning.
pub struct LogErrorHandler;

#[async_trait]
impl ErrorHandler for LogErrorHandler {
    async fn handle_error(&self, message: Option<&Message>, error: &BotError) {
        match message {
            Some(message) => warn!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                message_id = %message.id,
                error = %error,
                "Update caused error"
            ),
            None => warn!(error = %error, "Error outside of an update"),
        }
    }
}

/// Registry of error handlers keyed by name; every registered handler is
/// notified for each error, in insertion order.
///
/// The default log handler is registered under `"log"` at facade construction.
/// Remove it before adding a replacement, or both will fire.
#[derive(Clone)]
pub struct ErrorHandlerRegistry {
    handlers: Arc<RwLock<Vec<(String, Arc<dyn ErrorHandler>)>>>,
}

impl ErrorHandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Registers `handler` under `key`; an existing handler with the same key
    /// is replaced in place.
    pub fn add(&self, key: impl Into<String>, handler: Arc<dyn ErrorHandler>) {
        let key = key.into();
        debug!(key = %key, "Adding error handler");
        let mut handlers = self.handlers.write();
        match handlers.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = handler,
            None => handlers.push((key, handler)),
        }
    }

    /// Unregisters the handler under `key`. Fails when no such key exists.
    pub fn remove(&self, key: &str) -> Result<()> {
        debug!(key = %key, "Removing error handler");
        let mut handlers = self.handlers.write();
        match handlers.iter().position(|(k, _)| k == key) {
            Some(index) => {
                handlers.remove(index);
                Ok(())
            }
            None => Err(BotError::UnknownErrorHandler(key.to_string())),
        }
    }

    /// Snapshot of the registered handler keys, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.handlers.read().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Notifies every registered handler about `error`.
    pub async fn notify(&self, message: Option<&Message>, error: &BotError) {
        let snapshot: Vec<Arc<dyn ErrorHandler>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in snapshot {
            handler.handle_error(message, error).await;
        }
    }
}

impl Default for ErrorHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
