//! gatebot CLI: run the admin-gated Telegram bot. Config from env and
//! optional CLI args.

use anyhow::{Context, Result};
use clap::Parser;
use gatebot_cli::{load_config, AdminsCommand, Cli, Commands, PingCommand};
use gatebot_core::init_tracing;
use gatebot_telegram::BotFacade;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, owner } => run(token, owner).await,
    }
}

async fn run(token: Option<String>, owner: Option<i64>) -> Result<()> {
    let config = load_config(token, owner)
        .context("Load config from env (BOT_TOKEN, OWNER_ID; see .env)")?;

    let log_file = config
        .log_file
        .clone()
        .unwrap_or_else(|| "logs/gatebot.log".to_string());
    if let Some(dir) = std::path::Path::new(&log_file).parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Create log directory for {}", log_file))?;
    }
    init_tracing(&log_file)?;

    let facade = BotFacade::new(config).context("Build bot facade")?;
    facade.add_command("ping", Arc::new(PingCommand));
    facade.add_command("admins", Arc::new(AdminsCommand::new(facade.admin_set())));

    info!(
        owner_id = facade.owner_id(),
        commands = ?facade.commands(),
        "Bot initialized"
    );

    facade.start().await.context("Run polling loop")?;
    Ok(())
}
