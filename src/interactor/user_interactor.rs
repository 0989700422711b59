use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::interactor::repository::JournalRepository;

#[async_trait]
pub trait UserInteractor: Send + Sync {
    /// Create the user on first contact. Returns true if the user was new.
    async fn ensure_user(&self, chat_id: i64, username: &str) -> Result<bool>;
}

pub struct UserInteractorImpl {
    repository: Arc<dyn JournalRepository>,
}

impl UserInteractorImpl {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserInteractor for UserInteractorImpl {
    async fn ensure_user(&self, chat_id: i64, username: &str) -> Result<bool> {
        let existing = self
            .repository
            .get_user(chat_id)
            .await
            .map_err(|e| anyhow!("Failed to look up user: {}", e))?;

        if existing.is_some() {
            return Ok(false);
        }

        self.repository
            .save_user(chat_id, username)
            .await
            .map_err(|e| anyhow!("Failed to create user: {}", e))?;

        info!("Saved new user: {} ({})", username, chat_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactor::repository::InMemJournalRepository;

    #[tokio::test]
    async fn creates_user_once() {
        let repository = Arc::new(InMemJournalRepository::new());
        let interactor = UserInteractorImpl::new(repository.clone());

        assert!(interactor.ensure_user(5, "bob").await.unwrap());
        assert!(!interactor.ensure_user(5, "bob").await.unwrap());
        assert_eq!(
            repository.get_user(5).await.unwrap().map(|u| u.username),
            Some("bob".to_string())
        );
    }
}
