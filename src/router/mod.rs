use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::commands::{
    callback::handle_callback, handle_command, message::receive_message, BotCommands,
};
use crate::di::ServiceContainer;
use crate::interactor::user_interactor::UserInteractor;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

// Create the journal user on first contact, whatever the update is
async fn ensure_user(update: Update, services: Arc<ServiceContainer>) {
    let Some(user) = update.from() else {
        return;
    };

    let telegram_id = user.id.0 as i64;
    let username = user
        .username
        .clone()
        .unwrap_or_else(|| user.first_name.clone());

    match services
        .user_interactor()
        .ensure_user(telegram_id, &username)
        .await
    {
        Ok(true) => info!("Registered new user {} ({})", telegram_id, username),
        Ok(false) => {}
        Err(e) => error!("Error ensuring user {}: {}", telegram_id, e),
    }
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use teloxide::dispatching::UpdateFilterExt;

        let services_for_users = self.services.clone();
        let services_for_commands = self.services.clone();
        let services_for_messages = self.services.clone();
        let services_for_callbacks = self.services.clone();

        // Use BotCommands enum with teloxide's command filter
        let command_handler = teloxide::filter_command::<BotCommands, _>().endpoint(
            move |bot: Bot, msg: Message, cmd: BotCommands| {
                let services = services_for_commands.clone();
                async move { handle_command(bot, msg, cmd, services).await }
            },
        );

        // Everything else goes to the wizard of the sender
        let message_handler = Update::filter_message()
            .branch(command_handler)
            .branch(dptree::endpoint(move |bot: Bot, msg: Message| {
                let services = services_for_messages.clone();
                async move { receive_message(bot, msg, services).await }
            }));

        let callback_handler =
            Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, services).await }
            });

        dptree::entry()
            .inspect_async(move |update: Update| {
                let services = services_for_users.clone();
                async move { ensure_user(update, services).await }
            })
            .branch(message_handler)
            .branch(callback_handler)
    }
}
