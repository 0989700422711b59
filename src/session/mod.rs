use async_trait::async_trait;

use crate::entity::{BotError, State};

mod in_mem;
mod locks;

pub use in_mem::InMemSessionStore;
pub use locks::UserLocks;

/// Per-user conversation state, keyed by Telegram user id.
///
/// Backends keep no history: a user without an entry is `Idle`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: i64) -> Result<State, BotError>;
    async fn set(&self, user_id: i64, state: State) -> Result<(), BotError>;
    async fn clear(&self, user_id: i64) -> Result<(), BotError>;

    /// Mark the user's session as active without changing its state
    async fn touch(&self, user_id: i64) -> Result<(), BotError>;
}
