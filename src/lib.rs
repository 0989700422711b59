//! Trading journal bot for Telegram.
//!
//! Users register pairs and record completed buy/sell deals through a short
//! per-user wizard; the bot computes profit and keeps the history.

use anyhow::Context;
use log::info;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use teloxide::Bot;

pub mod commands;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod services;
pub mod session;
pub mod utils;
pub mod validation;
pub mod view;

pub use crate::config::AppConfig;
pub use crate::di::ServiceContainer;
pub use crate::router::{Router, TelegramRouter};
pub use crate::services::SessionSweeper;

use crate::interactor::db::PgJournalRepository;
use crate::interactor::repository::{InMemJournalRepository, JournalRepository};
use crate::session::InMemSessionStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open the journal backend. Postgres when a database URL is configured
/// (migrations are applied on connect), process memory otherwise.
pub async fn connect_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn JournalRepository>> {
    let Some(database_url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set, journal is kept in memory");
        return Ok(Arc::new(InMemJournalRepository::new()));
    };

    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await
        .context("Failed to create database connection pool")?;

    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations completed successfully");

    Ok(Arc::new(PgJournalRepository::new(Arc::new(db_pool))))
}

/// Wire the router, the service container and the session sweeper
pub fn create_application(
    bot: Bot,
    repository: Arc<dyn JournalRepository>,
    config: &AppConfig,
) -> (TelegramRouter, Bot, Arc<ServiceContainer>, SessionSweeper) {
    let sessions = Arc::new(InMemSessionStore::new(config.session_idle_timeout()));
    let services = Arc::new(ServiceContainer::new(
        repository,
        sessions.clone(),
        config.wizard_options(),
    ));

    let sweeper = SessionSweeper::new(
        sessions,
        services.locks(),
        config.session_sweep_interval(),
    );
    let router = TelegramRouter::new(services.clone());

    (router, bot, services, sweeper)
}
