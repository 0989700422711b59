use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use teloxide::prelude::*;

use super::ui::{
    is_pair_callback, resolve_pair_choice, ADD_DEAL_CALLBACK, ADD_PAIR_CALLBACK,
    CANCEL_CALLBACK, HISTORY_CALLBACK,
};
use super::{cancel, deal, history, pair, CommandHandler};
use crate::di::ServiceContainer;
use crate::presenter::wizard_presenter::{WizardInput, WizardPresenter};

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        info!("Failed to answer callback query: {}", err);
    }

    let callback_data = match q.data {
        Some(ref data) => data.clone(),
        None => return Ok(()),
    };

    let telegram_id = q.from.id.0 as i64;

    // Private chats share the id of the user
    let chat_id = match q.message {
        Some(ref msg) => msg.chat().id,
        None => ChatId(telegram_id),
    };

    info!(
        "Received callback: {} from user {}",
        callback_data, telegram_id
    );

    match callback_data.as_str() {
        ADD_DEAL_CALLBACK => {
            deal::AddDealCommand::execute(bot, chat_id, telegram_id, services).await
        }
        ADD_PAIR_CALLBACK => {
            pair::AddPairCommand::execute(bot, chat_id, telegram_id, services).await
        }
        HISTORY_CALLBACK => {
            history::HistoryCommand::execute(bot, chat_id, telegram_id, services).await
        }
        CANCEL_CALLBACK => {
            cancel::CancelCommand::execute(bot, chat_id, telegram_id, services).await
        }
        data if is_pair_callback(data) => {
            let pair = q
                .regular_message()
                .and_then(|msg| msg.reply_markup())
                .and_then(|keyboard| resolve_pair_choice(keyboard, data));

            let presenter = services.wizard_presenter(bot, chat_id);
            match pair {
                Some(pair) => {
                    presenter
                        .handle_input(telegram_id, WizardInput::PairChoice(pair))
                        .await
                }
                None => {
                    // Keyboard too old to read back, offer the pairs again
                    warn!("Unresolvable pair button {} from user {}", data, telegram_id);
                    presenter.start_add_deal(telegram_id).await
                }
            }
        }
        data => {
            warn!("Unknown callback {} from user {}", data, telegram_id);
            services.wizard_presenter(bot, chat_id).show_menu().await
        }
    }
}
