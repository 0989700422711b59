use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::view::journal_view::{JournalView, TelegramJournalView};

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "display this help message"
    }

    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        _telegram_id: i64,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        TelegramJournalView::new(bot, chat_id).display_help().await
    }
}
