use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::{WizardInput, WizardPresenter};

// Handler for every non-command message; routed by the user's wizard state
pub async fn receive_message(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let telegram_id = msg.from().map_or(chat_id.0, |user| user.id.0 as i64);

    let input = match msg.text() {
        Some(text) => {
            info!("{} say: {}", telegram_id, text);
            WizardInput::Text(text.to_string())
        }
        None => WizardInput::NonText,
    };

    services
        .wizard_presenter(bot, chat_id)
        .handle_input(telegram_id, input)
        .await
}
