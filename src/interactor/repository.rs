use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

use crate::entity::{BotError, Deal, User};

/// Durable store for users, pairs and deals
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Create the user if missing. Existing users are left untouched.
    async fn save_user(&self, chat_id: i64, username: &str) -> Result<(), BotError>;

    async fn get_user(&self, chat_id: i64) -> Result<Option<User>, BotError>;

    /// Register a pair for a user. Idempotent: the global pair is created once
    /// and the user association only if missing.
    async fn save_pair(&self, user_id: i64, pair_name: &str) -> Result<(), BotError>;

    async fn get_pairs(&self, user_id: i64) -> Result<Vec<String>, BotError>;

    async fn pair_belongs_to_user(&self, user_id: i64, pair_name: &str)
        -> Result<bool, BotError>;

    async fn save_deal(&self, deal: &Deal, user_id: i64) -> Result<(), BotError>;

    /// Committed deals, newest first
    async fn get_deals(&self, user_id: i64) -> Result<Vec<Deal>, BotError>;
}

#[derive(Default)]
struct Journal {
    users: HashMap<i64, User>,
    pairs: BTreeSet<String>,
    user_pairs: HashMap<i64, BTreeSet<String>>,
    deals: Vec<Deal>,
}

/// Repository kept in process memory, used when no database is configured
#[derive(Default)]
pub struct InMemJournalRepository {
    journal: RwLock<Journal>,
}

impl InMemJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalRepository for InMemJournalRepository {
    async fn save_user(&self, chat_id: i64, username: &str) -> Result<(), BotError> {
        let mut journal = self.journal.write().await;
        journal.users.entry(chat_id).or_insert_with(|| User {
            chat_id,
            username: username.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn get_user(&self, chat_id: i64) -> Result<Option<User>, BotError> {
        Ok(self.journal.read().await.users.get(&chat_id).cloned())
    }

    async fn save_pair(&self, user_id: i64, pair_name: &str) -> Result<(), BotError> {
        let mut journal = self.journal.write().await;
        if !journal.users.contains_key(&user_id) {
            return Err(BotError::UserNotFound);
        }

        journal.pairs.insert(pair_name.to_string());
        journal
            .user_pairs
            .entry(user_id)
            .or_default()
            .insert(pair_name.to_string());
        Ok(())
    }

    async fn get_pairs(&self, user_id: i64) -> Result<Vec<String>, BotError> {
        let journal = self.journal.read().await;
        Ok(journal
            .user_pairs
            .get(&user_id)
            .map(|pairs| pairs.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn pair_belongs_to_user(
        &self,
        user_id: i64,
        pair_name: &str,
    ) -> Result<bool, BotError> {
        let journal = self.journal.read().await;
        Ok(journal
            .user_pairs
            .get(&user_id)
            .is_some_and(|pairs| pairs.contains(pair_name)))
    }

    async fn save_deal(&self, deal: &Deal, user_id: i64) -> Result<(), BotError> {
        let mut journal = self.journal.write().await;
        if !journal.users.contains_key(&user_id) {
            return Err(BotError::UserNotFound);
        }
        if !journal.pairs.contains(&deal.pair) {
            return Err(BotError::PairNotFound);
        }

        journal.deals.push(Deal {
            user_id,
            ..deal.clone()
        });
        Ok(())
    }

    async fn get_deals(&self, user_id: i64) -> Result<Vec<Deal>, BotError> {
        let journal = self.journal.read().await;
        let mut deals: Vec<Deal> = journal
            .deals
            .iter()
            .filter(|deal| deal.user_id == user_id)
            .cloned()
            .collect();
        deals.sort_by(|a, b| b.deal_date.cmp(&a.deal_date));
        Ok(deals)
    }
}
