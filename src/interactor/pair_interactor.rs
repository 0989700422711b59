use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::ValidationError;
use crate::interactor::repository::JournalRepository;
use crate::validation;

#[async_trait]
pub trait PairInteractor: Send + Sync {
    fn validate_pair_name(&self, text: &str) -> Result<String, ValidationError>;
    async fn register_pair(&self, telegram_id: i64, pair_name: &str) -> Result<()>;
    async fn get_pairs(&self, telegram_id: i64) -> Result<Vec<String>>;
    async fn pair_belongs_to_user(&self, telegram_id: i64, pair_name: &str) -> Result<bool>;
}

pub struct PairInteractorImpl {
    repository: Arc<dyn JournalRepository>,
}

impl PairInteractorImpl {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PairInteractor for PairInteractorImpl {
    fn validate_pair_name(&self, text: &str) -> Result<String, ValidationError> {
        validation::validate_pair_name(text)
    }

    async fn register_pair(&self, telegram_id: i64, pair_name: &str) -> Result<()> {
        self.repository
            .save_pair(telegram_id, pair_name)
            .await
            .map_err(|e| anyhow!("Failed to save pair: {}", e))
    }

    async fn get_pairs(&self, telegram_id: i64) -> Result<Vec<String>> {
        self.repository
            .get_pairs(telegram_id)
            .await
            .map_err(|e| anyhow!("Failed to get pairs: {}", e))
    }

    async fn pair_belongs_to_user(&self, telegram_id: i64, pair_name: &str) -> Result<bool> {
        self.repository
            .pair_belongs_to_user(telegram_id, pair_name)
            .await
            .map_err(|e| anyhow!("Failed to check pair: {}", e))
    }
}
