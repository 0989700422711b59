use anyhow::Result;
use std::sync::Arc;
use teloxide::{prelude::*, types::BotCommand};

use crate::di::ServiceContainer;

pub mod callback;
pub mod cancel;
pub mod deal;
pub mod help;
pub mod history;
pub mod menu;
pub mod message;
pub mod pair;
pub mod start;
pub mod ui;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        chat_id: ChatId,
        telegram_id: i64,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Register all command handlers in the command system
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            start::StartCommand::command_name(),
            start::StartCommand::description(),
        ),
        (
            menu::MenuCommand::command_name(),
            menu::MenuCommand::description(),
        ),
        (
            pair::AddPairCommand::command_name(),
            pair::AddPairCommand::description(),
        ),
        (
            deal::AddDealCommand::command_name(),
            deal::AddDealCommand::description(),
        ),
        (
            history::HistoryCommand::command_name(),
            history::HistoryCommand::description(),
        ),
        (
            cancel::CancelCommand::command_name(),
            cancel::CancelCommand::description(),
        ),
        (
            help::HelpCommand::command_name(),
            help::HelpCommand::description(),
        ),
    ]
}

/// Publish the command list shown in the client's command menu
pub async fn set_bot_commands(bot: &Bot) -> Result<()> {
    let commands = register_commands()
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description));
    bot.set_my_commands(commands).await?;
    Ok(())
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot and show the main menu")]
    Start,
    #[command(description = "show the main menu")]
    Menu,
    #[command(rename = "add_pair", description = "register an asset/pair")]
    AddPair,
    #[command(rename = "add_deal", description = "record a completed deal")]
    AddDeal,
    #[command(description = "show your deal history")]
    History,
    #[command(description = "abort the current input")]
    Cancel,
    #[command(description = "display this help message")]
    Help,
}

/// Run the handler matching a parsed command
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let telegram_id = msg.from().map_or(chat_id.0, |user| user.id.0 as i64);

    match cmd {
        BotCommands::Start => start::StartCommand::execute(bot, chat_id, telegram_id, services).await,
        BotCommands::Menu => menu::MenuCommand::execute(bot, chat_id, telegram_id, services).await,
        BotCommands::AddPair => {
            pair::AddPairCommand::execute(bot, chat_id, telegram_id, services).await
        }
        BotCommands::AddDeal => {
            deal::AddDealCommand::execute(bot, chat_id, telegram_id, services).await
        }
        BotCommands::History => {
            history::HistoryCommand::execute(bot, chat_id, telegram_id, services).await
        }
        BotCommands::Cancel => {
            cancel::CancelCommand::execute(bot, chat_id, telegram_id, services).await
        }
        BotCommands::Help => help::HelpCommand::execute(bot, chat_id, telegram_id, services).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands as _;

    #[test]
    fn parses_wizard_commands() {
        assert_eq!(
            BotCommands::parse("/add_pair", "journal_bot").unwrap(),
            BotCommands::AddPair
        );
        assert_eq!(
            BotCommands::parse("/add_deal", "journal_bot").unwrap(),
            BotCommands::AddDeal
        );
        assert_eq!(
            BotCommands::parse("/history", "journal_bot").unwrap(),
            BotCommands::History
        );
        assert!(BotCommands::parse("/unknown", "journal_bot").is_err());
    }

    #[test]
    fn every_command_is_registered() {
        let names: Vec<_> = register_commands().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["start", "menu", "add_pair", "add_deal", "history", "cancel", "help"]
        );
    }
}
