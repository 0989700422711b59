use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use teloxide::{prelude::*, types::ParseMode, utils::html::escape, Bot};

use crate::commands::ui::{create_main_menu_keyboard, create_pair_choice_keyboard};
use crate::entity::{Deal, ValidationError};
use crate::utils::{format_decimal, format_percent};

/// Everything the journal shows to a user
#[async_trait]
pub trait JournalView: Send + Sync {
    async fn display_welcome(&self) -> Result<()>;
    async fn display_help(&self) -> Result<()>;
    async fn display_menu(&self) -> Result<()>;
    async fn prompt_for_pair_name(&self) -> Result<()>;
    async fn display_pair_saved(&self, pair: &str) -> Result<()>;
    async fn display_pair_save_failed(&self) -> Result<()>;
    async fn display_no_pairs(&self) -> Result<()>;
    async fn display_pair_choice(&self, pairs: &[String]) -> Result<()>;
    async fn display_choose_pair_hint(&self) -> Result<()>;
    async fn display_no_such_pair(&self, pair: &str) -> Result<()>;
    async fn prompt_for_amount(&self, pair: &str) -> Result<()>;
    async fn prompt_for_buy_price(&self) -> Result<()>;
    async fn prompt_for_sell_price(&self) -> Result<()>;
    async fn display_validation_error(&self, error: &ValidationError) -> Result<()>;
    async fn display_text_required(&self) -> Result<()>;
    async fn display_deal_receipt(&self, deal: &Deal) -> Result<()>;
    async fn display_division_by_zero(&self) -> Result<()>;
    async fn display_deal_save_failed(&self, can_retry: bool) -> Result<()>;
    async fn display_history(&self, deals: &[Deal]) -> Result<()>;
    async fn display_cancelled(&self) -> Result<()>;
    async fn display_storage_failed(&self) -> Result<()>;
}

pub struct TelegramJournalView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramJournalView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send_text(&self, text: impl Into<String>) -> Result<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn send_html(&self, text: impl Into<String>) -> Result<()> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

pub fn format_deal_receipt(deal: &Deal) -> String {
    format!(
        "<b>Deal added 🎉 Your deal:</b>\n\
        <b>Pair:</b> {}\n\
        <b>Amount:</b> {}\n\
        <b>Buy:</b> {}\n\
        <b>Sell:</b> {}\n\
        <b>Profit:</b> {}$\n\
        <b>Profit percent:</b> {}%\n",
        escape(&deal.pair),
        format_decimal(deal.amount),
        format_decimal(deal.buy_price),
        format_decimal(deal.sell_price),
        format_decimal(deal.profit),
        format_percent(deal.profit_percent)
    )
}

pub fn format_history(deals: &[Deal]) -> String {
    let mut text = String::from("<b>Your deals</b>\n");

    for deal in deals {
        text.push_str(&format!(
            "\n{} <b>{}</b>\n• {} @ {} → {}\n• Profit: {}$ ({}%)\n",
            deal.deal_date.format("%Y-%m-%d %H:%M"),
            escape(&deal.pair),
            format_decimal(deal.amount),
            format_decimal(deal.buy_price),
            format_decimal(deal.sell_price),
            format_decimal(deal.profit),
            format_percent(deal.profit_percent)
        ));
    }

    let total: Decimal = deals.iter().map(|deal| deal.profit).sum();
    text.push_str(&format!(
        "\n<b>Total profit:</b> {}$ over {} deal(s)",
        format_decimal(total),
        deals.len()
    ));

    text
}

#[async_trait]
impl JournalView for TelegramJournalView {
    async fn display_welcome(&self) -> Result<()> {
        self.send_text(
            "Hello 👋\nThis bot keeps a journal of your trades 📖\n\n\
            Supported commands:\n\
            /add_deal - add a new deal\n\
            /add_pair - add an asset/pair\n\
            /history - show your deal history\n\
            /cancel - abort the current input",
        )
        .await
    }

    async fn display_help(&self) -> Result<()> {
        self.send_text(
            "Available commands:\n\
            /start - start the bot\n\
            /menu - show the main menu\n\
            /add_pair - register an asset/pair\n\
            /add_deal - record a completed deal\n\
            /history - show your deal history\n\
            /cancel - abort the current input\n\
            /help - show this help",
        )
        .await
    }

    async fn display_menu(&self) -> Result<()> {
        self.bot
            .send_message(self.chat_id, "Choose an action")
            .reply_markup(create_main_menu_keyboard())
            .await?;
        Ok(())
    }

    async fn prompt_for_pair_name(&self) -> Result<()> {
        self.send_text("Enter the asset/pair name (e.g. Amazon, BTC/USD):")
            .await
    }

    async fn display_pair_saved(&self, pair: &str) -> Result<()> {
        self.send_text(format!("Your pair has been saved: {} ✅", pair))
            .await
    }

    async fn display_pair_save_failed(&self) -> Result<()> {
        self.send_text("Failed to save the pair, please try again.")
            .await
    }

    async fn display_no_pairs(&self) -> Result<()> {
        self.send_text(
            "You don't have any pairs to add a deal for yet. Add one with the 'Add pair' button.",
        )
        .await
    }

    async fn display_pair_choice(&self, pairs: &[String]) -> Result<()> {
        self.bot
            .send_message(self.chat_id, "Choose a pair for the deal:")
            .reply_markup(create_pair_choice_keyboard(pairs))
            .await?;
        Ok(())
    }

    async fn display_choose_pair_hint(&self) -> Result<()> {
        self.send_text("Please pick a pair using the buttons above.")
            .await
    }

    async fn display_no_such_pair(&self, pair: &str) -> Result<()> {
        self.send_text(format!("No such pair: {}", pair)).await
    }

    async fn prompt_for_amount(&self, pair: &str) -> Result<()> {
        self.send_html(format!(
            "<b>{}</b>\nEnter the amount:",
            escape(pair)
        ))
        .await
    }

    async fn prompt_for_buy_price(&self) -> Result<()> {
        self.send_text("Enter the buy price:").await
    }

    async fn prompt_for_sell_price(&self) -> Result<()> {
        self.send_text("Enter the sell price:").await
    }

    async fn display_validation_error(&self, error: &ValidationError) -> Result<()> {
        self.send_text(format!("❌ {}", error)).await
    }

    async fn display_text_required(&self) -> Result<()> {
        self.send_text("Please send the value as a text message.")
            .await
    }

    async fn display_deal_receipt(&self, deal: &Deal) -> Result<()> {
        self.send_html(format_deal_receipt(deal)).await
    }

    async fn display_division_by_zero(&self) -> Result<()> {
        self.send_text(
            "The buy price is zero, so the profit percent cannot be calculated. The deal was not saved.",
        )
        .await
    }

    async fn display_deal_save_failed(&self, can_retry: bool) -> Result<()> {
        if can_retry {
            self.send_text(
                "Failed to save the deal. Send the sell price again to retry, or /cancel to abort.",
            )
            .await
        } else {
            self.send_text("Failed to save the deal.").await
        }
    }

    async fn display_history(&self, deals: &[Deal]) -> Result<()> {
        if deals.is_empty() {
            return self.send_text("You have no deals yet.").await;
        }

        self.send_html(format_history(deals)).await
    }

    async fn display_cancelled(&self) -> Result<()> {
        self.send_text("Cancelled.").await
    }

    async fn display_storage_failed(&self) -> Result<()> {
        self.send_text("Something went wrong, please try again later.")
            .await
    }
}
