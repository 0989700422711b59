use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::entity::{DealDraft, DealError, State};
use crate::interactor::deal_interactor::DealInteractor;
use crate::interactor::pair_interactor::PairInteractor;
use crate::session::{SessionStore, UserLocks};
use crate::view::journal_view::JournalView;

/// Inbound event, already classified by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum WizardInput {
    /// Free text message
    Text(String),
    /// Message without text (sticker, photo, ...)
    NonText,
    /// Pair choice button
    PairChoice(String),
}

/// Behaviour switches for the two ambiguous wizard situations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardOptions {
    /// Reject a pair choice the user has not registered instead of continuing
    pub strict_pair_choice: bool,
    /// Stay on the sell price step when saving the deal fails
    pub keep_deal_on_save_failure: bool,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            strict_pair_choice: true,
            keep_deal_on_save_failure: true,
        }
    }
}

#[async_trait]
pub trait WizardPresenter: Send + Sync {
    async fn start_add_pair(&self, telegram_id: i64) -> Result<()>;
    async fn start_add_deal(&self, telegram_id: i64) -> Result<()>;
    async fn handle_input(&self, telegram_id: i64, input: WizardInput) -> Result<()>;
    async fn cancel(&self, telegram_id: i64) -> Result<()>;
    async fn show_history(&self, telegram_id: i64) -> Result<()>;
    async fn show_menu(&self) -> Result<()>;
}

pub struct WizardPresenterImpl<V> {
    pair_interactor: Arc<dyn PairInteractor>,
    deal_interactor: Arc<dyn DealInteractor>,
    sessions: Arc<dyn SessionStore>,
    locks: Arc<UserLocks>,
    view: Arc<V>,
    options: WizardOptions,
}

impl<V> WizardPresenterImpl<V>
where
    V: JournalView,
{
    pub fn new(
        pair_interactor: Arc<dyn PairInteractor>,
        deal_interactor: Arc<dyn DealInteractor>,
        sessions: Arc<dyn SessionStore>,
        locks: Arc<UserLocks>,
        view: Arc<V>,
        options: WizardOptions,
    ) -> Self {
        Self {
            pair_interactor,
            deal_interactor,
            sessions,
            locks,
            view,
            options,
        }
    }

    async fn update_state(&self, telegram_id: i64, state: State) -> Result<()> {
        info!("update user {} state to {}", telegram_id, state.name());
        self.sessions.set(telegram_id, state).await?;
        Ok(())
    }

    async fn receive_pair_name(&self, telegram_id: i64, input: WizardInput) -> Result<()> {
        let text = match input {
            WizardInput::Text(text) => text,
            _ => return self.view.display_text_required().await,
        };

        let pair = match self.pair_interactor.validate_pair_name(&text) {
            Ok(pair) => pair,
            Err(e) => return self.view.display_validation_error(&e).await,
        };

        if let Err(e) = self.pair_interactor.register_pair(telegram_id, &pair).await {
            error!("Error saving pair for user {}: {}", telegram_id, e);
            return self.view.display_pair_save_failed().await;
        }

        self.update_state(telegram_id, State::Idle).await?;
        self.view.display_pair_saved(&pair).await?;
        self.view.display_menu().await
    }

    // Start the pending deal over with the chosen pair. Valid from every deal
    // step, so the last pressed pair button wins.
    async fn receive_pair_choice(&self, telegram_id: i64, pair: String) -> Result<()> {
        let belongs = match self
            .pair_interactor
            .pair_belongs_to_user(telegram_id, &pair)
            .await
        {
            Ok(belongs) => belongs,
            Err(e) => {
                error!("Error getting pair for user {}: {}", telegram_id, e);
                return self.view.display_storage_failed().await;
            }
        };

        if !belongs {
            warn!("User {} chose unregistered pair {}", telegram_id, pair);
            self.view.display_no_such_pair(&pair).await?;
            if self.options.strict_pair_choice {
                return Ok(());
            }
        }

        self.update_state(telegram_id, State::AwaitingAmount { pair: pair.clone() })
            .await?;
        self.view.prompt_for_amount(&pair).await
    }

    async fn receive_amount(
        &self,
        telegram_id: i64,
        pair: String,
        input: WizardInput,
    ) -> Result<()> {
        let text = match input {
            WizardInput::Text(text) => text,
            _ => return self.view.display_text_required().await,
        };

        let amount = match self.deal_interactor.validate_amount(&text) {
            Ok(amount) => amount,
            Err(e) => return self.view.display_validation_error(&e).await,
        };

        self.update_state(telegram_id, State::AwaitingBuyPrice { pair, amount })
            .await?;
        self.view.prompt_for_buy_price().await
    }

    async fn receive_buy_price(
        &self,
        telegram_id: i64,
        pair: String,
        amount: Decimal,
        input: WizardInput,
    ) -> Result<()> {
        let text = match input {
            WizardInput::Text(text) => text,
            _ => return self.view.display_text_required().await,
        };

        let buy_price = match self.deal_interactor.validate_price(&text) {
            Ok(price) => price,
            Err(e) => return self.view.display_validation_error(&e).await,
        };

        self.update_state(
            telegram_id,
            State::AwaitingSellPrice {
                pair,
                amount,
                buy_price,
            },
        )
        .await?;
        self.view.prompt_for_sell_price().await
    }

    async fn receive_sell_price(
        &self,
        telegram_id: i64,
        pair: String,
        amount: Decimal,
        buy_price: Decimal,
        input: WizardInput,
    ) -> Result<()> {
        let text = match input {
            WizardInput::Text(text) => text,
            _ => return self.view.display_text_required().await,
        };

        let sell_price = match self.deal_interactor.validate_price(&text) {
            Ok(price) => price,
            Err(e) => return self.view.display_validation_error(&e).await,
        };

        let draft = DealDraft {
            pair,
            amount,
            buy_price,
            sell_price,
        };

        match self.deal_interactor.complete_deal(telegram_id, draft).await {
            Ok(deal) => {
                self.update_state(telegram_id, State::Idle).await?;
                self.view.display_deal_receipt(&deal).await?;
            }
            Err(DealError::DivisionByZero) => {
                warn!("User {} entered a zero buy price", telegram_id);
                self.update_state(telegram_id, State::Idle).await?;
                self.view.display_division_by_zero().await?;
            }
            Err(DealError::Persistence(e)) => {
                error!("Deal of user {} was not saved: {}", telegram_id, e);
                if self.options.keep_deal_on_save_failure {
                    return self.view.display_deal_save_failed(true).await;
                }
                self.update_state(telegram_id, State::Idle).await?;
                self.view.display_deal_save_failed(false).await?;
            }
        }

        self.view.display_menu().await
    }
}

#[async_trait]
impl<V> WizardPresenter for WizardPresenterImpl<V>
where
    V: JournalView + Send + Sync,
{
    async fn start_add_pair(&self, telegram_id: i64) -> Result<()> {
        let _guard = self.locks.acquire(telegram_id).await;

        self.update_state(telegram_id, State::AwaitingPairName)
            .await?;
        self.view.prompt_for_pair_name().await
    }

    async fn start_add_deal(&self, telegram_id: i64) -> Result<()> {
        let _guard = self.locks.acquire(telegram_id).await;

        info!("adding deal to {}", telegram_id);

        let pairs = match self.pair_interactor.get_pairs(telegram_id).await {
            Ok(pairs) => pairs,
            Err(e) => {
                error!("Error getting pairs for user {}: {}", telegram_id, e);
                return self.view.display_storage_failed().await;
            }
        };

        if pairs.is_empty() {
            return self.view.display_no_pairs().await;
        }

        // A keyboard Telegram refused leaves the previous state in place
        self.view.display_pair_choice(&pairs).await?;
        self.update_state(telegram_id, State::AwaitingDealPairChoice)
            .await
    }

    async fn handle_input(&self, telegram_id: i64, input: WizardInput) -> Result<()> {
        let _guard = self.locks.acquire(telegram_id).await;

        let state = self.sessions.get(telegram_id).await?;
        if state.is_idle() {
            return self.view.display_menu().await;
        }
        self.sessions.touch(telegram_id).await?;

        if let WizardInput::PairChoice(pair) = input {
            let in_deal = matches!(
                state,
                State::AwaitingDealPairChoice
                    | State::AwaitingAmount { .. }
                    | State::AwaitingBuyPrice { .. }
                    | State::AwaitingSellPrice { .. }
            );
            if in_deal {
                return self.receive_pair_choice(telegram_id, pair).await;
            }
            return self.view.display_text_required().await;
        }

        match state {
            State::Idle => self.view.display_menu().await,
            State::AwaitingPairName => self.receive_pair_name(telegram_id, input).await,
            State::AwaitingDealPairChoice => self.view.display_choose_pair_hint().await,
            State::AwaitingAmount { pair } => self.receive_amount(telegram_id, pair, input).await,
            State::AwaitingBuyPrice { pair, amount } => {
                self.receive_buy_price(telegram_id, pair, amount, input)
                    .await
            }
            State::AwaitingSellPrice {
                pair,
                amount,
                buy_price,
            } => {
                self.receive_sell_price(telegram_id, pair, amount, buy_price, input)
                    .await
            }
        }
    }

    async fn cancel(&self, telegram_id: i64) -> Result<()> {
        let _guard = self.locks.acquire(telegram_id).await;

        info!("user {} cancelled the wizard", telegram_id);
        self.sessions.clear(telegram_id).await?;
        self.view.display_cancelled().await?;
        self.view.display_menu().await
    }

    async fn show_history(&self, telegram_id: i64) -> Result<()> {
        match self.deal_interactor.get_history(telegram_id).await {
            Ok(deals) => self.view.display_history(&deals).await?,
            Err(e) => {
                error!("Error getting deals for user {}: {}", telegram_id, e);
                self.view.display_storage_failed().await?;
            }
        }

        self.view.display_menu().await
    }

    async fn show_menu(&self) -> Result<()> {
        self.view.display_menu().await
    }
}
