//! # gatebot-core
//!
//! Core types and traits for the admin-gated Telegram bot: [`Bot`], [`CommandHandler`],
//! [`Middleware`], [`ErrorHandler`], message and user types, the [`AdminSet`] allow-list,
//! and tracing initialization. Transport-agnostic; used by gatebot-telegram and command-chain.

pub mod admin;
pub mod bot;
pub mod error;
pub mod error_handler;
pub mod logger;
pub mod types;

pub use admin::AdminSet;
pub use bot::{Bot, Formatting};
pub use error::{BotError, Result};
pub use error_handler::{ErrorHandler, ErrorHandlerRegistry, LogErrorHandler};
pub use logger::init_tracing;
pub use types::{
    Chat, CommandHandler, CommandInvocation, CommandOutcome, Message, Middleware, User,
};
