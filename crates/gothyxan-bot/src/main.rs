#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod dispatch;
mod handler;
mod render;
mod shutdown;
mod transport;

use std::process;
use std::sync::Arc;

use anyhow::Context;
use gothyxan_reqwest::ReqwestClient;
use teloxide::prelude::*;

use crate::config::Cli;
use crate::handler::BotState;
use crate::transport::TelegramTransport;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "gothyxan_bot::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "gothyxan_bot::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "gothyxan_bot::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "bot stopped"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "bot terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let client = ReqwestClient::new(cli.backend.clone())
        .context("failed to create backend client")?;
    let placeholder_url = format!("{}/media/placeholder?variant=medium", client.api_base());
    let backend = client.into_service();

    let bot = Bot::new(cli.bot_token());
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let state = BotState::new(backend.clone(), transport, placeholder_url);

    let mut dispatcher = Dispatcher::builder(bot, dispatch::schema())
        .dependencies(dptree::deps![state.clone()])
        .default_handler(|update| async move {
            tracing::trace!(
                target: TRACING_TARGET_STARTUP,
                update_id = update.id.0,
                "Unhandled update"
            );
        })
        .build();

    let token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        shutdown::shutdown_signal().await;
        match token.shutdown() {
            Ok(stopped) => stopped.await,
            Err(error) => tracing::debug!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "Dispatcher was not running"
            ),
        }
    });

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "gothyxan bot started"
    );
    dispatcher.dispatch().await;

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        sessions = state.store().len().await,
        "Dispatcher stopped, closing backend client"
    );
    backend.close().await;
    Ok(())
}
