//! # Football Squad Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database,
//! and runs the Telegram bot dispatcher.

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod database;
mod utils;

use crate::bot::handlers::BotHandler;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::database::store::RegistrationStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "football_squad_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Football Squad Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}", config.database_url);
    if config.admin_ids.is_empty() {
        tracing::warn!("No admin IDs configured - nobody can create events");
    } else {
        info!("Admins configured: {}", config.admin_ids.len());
    }

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.init_schema().await?;
    info!("Database initialized successfully");

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let store = RegistrationStore::new(db_manager.pool.clone());
    let handler = BotHandler::new(store, Arc::new(config));
    info!("Telegram bot initialized successfully");

    let storage: Arc<InMemStorage<()>> = InMemStorage::new().into();
    Dispatcher::builder(bot, handler.schema())
        .dependencies(dptree::deps![storage])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Application stopped");
    Ok(())
}
