use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::WizardPresenter;
use crate::view::journal_view::{JournalView, TelegramJournalView};

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn description() -> &'static str {
        "start the bot"
    }

    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        telegram_id: i64,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Start command received from Telegram ID: {}", telegram_id);

        // The user itself is created by the router middleware
        TelegramJournalView::new(bot.clone(), chat_id)
            .display_welcome()
            .await?;

        services
            .wizard_presenter(bot, chat_id)
            .show_menu()
            .await
    }
}
