use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use log::{error, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::entity::{Deal, DealDraft, DealError, ValidationError};
use crate::interactor::repository::JournalRepository;
use crate::validation;

#[async_trait]
pub trait DealInteractor: Send + Sync {
    fn validate_amount(&self, text: &str) -> Result<Decimal, ValidationError>;
    fn validate_price(&self, text: &str) -> Result<Decimal, ValidationError>;

    /// Compute profit figures, stamp the current time and store the deal.
    /// Nothing is stored when the calculation fails.
    async fn complete_deal(&self, telegram_id: i64, draft: DealDraft) -> Result<Deal, DealError>;

    async fn get_history(&self, telegram_id: i64) -> Result<Vec<Deal>>;
}

pub struct DealInteractorImpl {
    repository: Arc<dyn JournalRepository>,
}

impl DealInteractorImpl {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl DealInteractor for DealInteractorImpl {
    fn validate_amount(&self, text: &str) -> Result<Decimal, ValidationError> {
        validation::validate_amount(text)
    }

    fn validate_price(&self, text: &str) -> Result<Decimal, ValidationError> {
        validation::validate_price(text)
    }

    async fn complete_deal(&self, telegram_id: i64, draft: DealDraft) -> Result<Deal, DealError> {
        let deal = draft.into_deal(telegram_id, Utc::now())?;

        if let Err(e) = self.repository.save_deal(&deal, telegram_id).await {
            error!("Error saving deal for user {}: {}", telegram_id, e);
            return Err(DealError::Persistence(e));
        }

        info!(
            "{} deal: pair {}, amount {}, buy price {}, sell price {}, profit {}, profit percentage {}",
            telegram_id,
            deal.pair,
            deal.amount,
            deal.buy_price,
            deal.sell_price,
            deal.profit,
            deal.profit_percent
        );

        Ok(deal)
    }

    async fn get_history(&self, telegram_id: i64) -> Result<Vec<Deal>> {
        self.repository
            .get_deals(telegram_id)
            .await
            .map_err(|e| anyhow!("Failed to get deals: {}", e))
    }
}
