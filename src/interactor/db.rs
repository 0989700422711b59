use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sqlx::{Error as SqlxError, PgPool};
use std::sync::Arc;

use crate::entity::{BotError, Deal, User};
use crate::interactor::repository::JournalRepository;

// Create user unless one with the same chat id exists
pub async fn create_user(pool: &PgPool, chat_id: i64, username: &str) -> Result<bool, SqlxError> {
    let result = sqlx::query(
        "INSERT INTO users (chat_id, username, created_at) VALUES ($1, $2, $3)
         ON CONFLICT (chat_id) DO NOTHING",
    )
    .bind(chat_id)
    .bind(username)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let created = result.rows_affected() > 0;
    if created {
        info!("Created new user with chat ID: {}", chat_id);
    }

    Ok(created)
}

// Get user by chat id
pub async fn get_user_by_chat_id(pool: &PgPool, chat_id: i64) -> Result<Option<User>, SqlxError> {
    sqlx::query_as::<_, User>("SELECT chat_id, username, created_at FROM users WHERE chat_id = $1")
        .bind(chat_id)
        .fetch_optional(pool)
        .await
}

// Register pair globally (once) and link it to the user (once)
pub async fn add_user_pair(pool: &PgPool, chat_id: i64, pair_name: &str) -> Result<(), SqlxError> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO pairs (pair_name) VALUES ($1) ON CONFLICT (pair_name) DO NOTHING")
        .bind(pair_name)
        .execute(&mut *tx)
        .await?;

    let pair_id: i32 = sqlx::query_scalar("SELECT pair_id FROM pairs WHERE pair_name = $1")
        .bind(pair_name)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO user_pairs (user_id, pair_id) VALUES ($1, $2)
         ON CONFLICT (user_id, pair_id) DO NOTHING",
    )
    .bind(chat_id)
    .bind(pair_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Linked pair {} (id {}) to user {}", pair_name, pair_id, chat_id);
    Ok(())
}

// Pair names registered by the user
pub async fn get_user_pairs(pool: &PgPool, chat_id: i64) -> Result<Vec<String>, SqlxError> {
    sqlx::query_scalar(
        "SELECT p.pair_name FROM pairs p
         JOIN user_pairs up ON up.pair_id = p.pair_id
         WHERE up.user_id = $1
         ORDER BY p.pair_name",
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await
}

pub async fn user_has_pair(pool: &PgPool, chat_id: i64, pair_name: &str) -> Result<bool, SqlxError> {
    sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT 1 FROM user_pairs up
            JOIN pairs p ON p.pair_id = up.pair_id
            WHERE up.user_id = $1 AND p.pair_name = $2
         )",
    )
    .bind(chat_id)
    .bind(pair_name)
    .fetch_one(pool)
    .await
}

// Record a completed deal. Returns the number of inserted rows, zero when the
// pair does not exist.
pub async fn record_deal(pool: &PgPool, chat_id: i64, deal: &Deal) -> Result<u64, SqlxError> {
    let result = sqlx::query(
        "INSERT INTO deals (user_id, pair_id, amount, buy_price, sell_price, profit, profit_percent, deal_date)
         SELECT $1, pair_id, $3, $4, $5, $6, $7, $8 FROM pairs WHERE pair_name = $2",
    )
    .bind(chat_id)
    .bind(&deal.pair)
    .bind(deal.amount)
    .bind(deal.buy_price)
    .bind(deal.sell_price)
    .bind(deal.profit)
    .bind(deal.profit_percent)
    .bind(deal.deal_date)
    .execute(pool)
    .await?;

    info!(
        "Recorded deal for user {}: pair {}, profit {}",
        chat_id, deal.pair, deal.profit
    );

    Ok(result.rows_affected())
}

// Get user deal history, newest first
pub async fn get_user_deals(pool: &PgPool, chat_id: i64) -> Result<Vec<Deal>, SqlxError> {
    sqlx::query_as::<_, Deal>(
        "SELECT d.user_id, p.pair_name, d.amount, d.buy_price, d.sell_price,
                d.profit, d.profit_percent, d.deal_date
         FROM deals d
         JOIN pairs p ON p.pair_id = d.pair_id
         WHERE d.user_id = $1
         ORDER BY d.deal_date DESC",
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await
}

/// Postgres backed journal
pub struct PgJournalRepository {
    db_pool: Arc<PgPool>,
}

impl PgJournalRepository {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl JournalRepository for PgJournalRepository {
    async fn save_user(&self, chat_id: i64, username: &str) -> Result<(), BotError> {
        create_user(&self.db_pool, chat_id, username).await?;
        Ok(())
    }

    async fn get_user(&self, chat_id: i64) -> Result<Option<User>, BotError> {
        Ok(get_user_by_chat_id(&self.db_pool, chat_id).await?)
    }

    async fn save_pair(&self, user_id: i64, pair_name: &str) -> Result<(), BotError> {
        Ok(add_user_pair(&self.db_pool, user_id, pair_name).await?)
    }

    async fn get_pairs(&self, user_id: i64) -> Result<Vec<String>, BotError> {
        Ok(get_user_pairs(&self.db_pool, user_id).await?)
    }

    async fn pair_belongs_to_user(
        &self,
        user_id: i64,
        pair_name: &str,
    ) -> Result<bool, BotError> {
        Ok(user_has_pair(&self.db_pool, user_id, pair_name).await?)
    }

    async fn save_deal(&self, deal: &Deal, user_id: i64) -> Result<(), BotError> {
        match record_deal(&self.db_pool, user_id, deal).await? {
            0 => Err(BotError::PairNotFound),
            _ => Ok(()),
        }
    }

    async fn get_deals(&self, user_id: i64) -> Result<Vec<Deal>, BotError> {
        Ok(get_user_deals(&self.db_pool, user_id).await?)
    }
}
