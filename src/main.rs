//! Trading journal bot for Telegram - Main executable
use anyhow::Context;
use deal_journal_bot::{AppConfig, Router};
use dotenv::dotenv;
use log::{info, warn};
use teloxide::{dptree, error_handlers::LoggingErrorHandler, Bot};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Deal Journal Telegram Bot v{}",
        deal_journal_bot::VERSION
    );

    let config = AppConfig::load()
        .context("TELEGRAM_BOT_TOKEN must be set in environment variables")?;

    let bot = Bot::new(&config.telegram_bot_token);
    if let Err(e) = deal_journal_bot::commands::set_bot_commands(&bot).await {
        warn!("Failed to publish bot commands: {}", e);
    }
    let repository = deal_journal_bot::connect_repository(&config).await?;

    info!("Initializing bot application...");
    let (router, bot, service_container, mut session_sweeper) =
        deal_journal_bot::create_application(bot, repository, &config);

    if config.session_idle_timeout().is_some() {
        info!("Starting session sweeper...");
        session_sweeper.start();
    }

    let handler = router.setup_handlers();

    // Build dispatcher with dependency injections and control-C handling
    let mut dispatcher = teloxide::dispatching::Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service_container])
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    info!("Stopping session sweeper...");
    session_sweeper.stop().await;

    Ok(())
}
