use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::WizardPresenter;

pub struct AddDealCommand;

impl CommandHandler for AddDealCommand {
    fn command_name() -> &'static str {
        "add_deal"
    }

    fn description() -> &'static str {
        "record a completed deal"
    }

    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        telegram_id: i64,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Add deal requested by user: {}", telegram_id);

        services
            .wizard_presenter(bot, chat_id)
            .start_add_deal(telegram_id)
            .await
    }
}
