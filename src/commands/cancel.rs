use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::WizardPresenter;

pub struct CancelCommand;

impl CommandHandler for CancelCommand {
    fn command_name() -> &'static str {
        "cancel"
    }

    fn description() -> &'static str {
        "abort the current input"
    }

    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        telegram_id: i64,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        services
            .wizard_presenter(bot, chat_id)
            .cancel(telegram_id)
            .await
    }
}
