use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// Failure raised by the underlying Telegram client (invalid token, send
    /// failure, rate limit). The client's message is preserved, not translated.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Bot is not running")]
    NotRunning,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown admin id: {0}")]
    UnknownAdmin(i64),

    #[error("Unknown error handler: {0}")]
    UnknownErrorHandler(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
