use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::WizardPresenter;

pub struct MenuCommand;

impl CommandHandler for MenuCommand {
    fn command_name() -> &'static str {
        "menu"
    }

    fn description() -> &'static str {
        "main menu"
    }

    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        _telegram_id: i64,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        services
            .wizard_presenter(bot, chat_id)
            .show_menu()
            .await
    }
}
