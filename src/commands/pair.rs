use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::WizardPresenter;

pub struct AddPairCommand;

impl CommandHandler for AddPairCommand {
    fn command_name() -> &'static str {
        "add_pair"
    }

    fn description() -> &'static str {
        "register an asset/pair"
    }

    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        telegram_id: i64,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Add pair requested by user: {}", telegram_id);

        services
            .wizard_presenter(bot, chat_id)
            .start_add_pair(telegram_id)
            .await
    }
}
