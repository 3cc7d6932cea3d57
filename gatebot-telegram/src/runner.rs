//! Polling runner: receives updates via a teloxide Dispatcher, converts each
//! message to a core Message, and hands it to [`Dispatch`] in a spawned task.

use crate::adapters::TelegramMessageWrapper;
use crate::dispatch::Dispatch;
use gatebot_core::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use teloxide::dispatching::{Dispatcher, ShutdownToken, UpdateFilterExt};
use teloxide::dptree;
use teloxide::prelude::*;
use tracing::{debug, info, instrument};

/// Runs the long-polling loop until the shutdown token parked in
/// `shutdown_slot` is triggered.
///
/// The token is placed into the slot before polling starts and cleared when
/// the loop winds down; [`crate::BotFacade::stop`] consumes it. Each incoming
/// message is handled in a spawned task so polling is never blocked by a slow
/// handler.
#[instrument(skip(bot, dispatch, shutdown_slot))]
pub async fn run_polling(
    bot: teloxide::Bot,
    dispatch: Arc<Dispatch>,
    shutdown_slot: &Mutex<Option<ShutdownToken>>,
) -> Result<()> {
    let handler = Update::filter_message().endpoint(
        |msg: teloxide::types::Message, dispatch: Arc<Dispatch>| async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            // Spawn per message so the polling loop returns immediately.
            tokio::spawn(async move {
                dispatch.handle(&core_msg).await;
            });
            respond(())
        },
    );

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatch])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Skipping unsupported update kind");
        })
        .enable_ctrlc_handler()
        .build();

    *shutdown_slot.lock() = Some(dispatcher.shutdown_token());
    info!("Polling started");
    dispatcher.dispatch().await;
    *shutdown_slot.lock() = None;
    info!("Polling stopped");

    Ok(())
}
