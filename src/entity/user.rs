use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// User model matching the database schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub chat_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
