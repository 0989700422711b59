use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::WizardPresenter;

pub struct HistoryCommand;

impl CommandHandler for HistoryCommand {
    fn command_name() -> &'static str {
        "history"
    }

    fn description() -> &'static str {
        "show your deal history"
    }

    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        telegram_id: i64,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("History requested by user: {}", telegram_id);

        services
            .wizard_presenter(bot, chat_id)
            .show_history(telegram_id)
            .await
    }
}
