use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use std::time::{Duration, Instant};

use super::SessionStore;
use crate::entity::{BotError, State};

struct SessionEntry {
    state: State,
    touched_at: Instant,
}

/// Process-local session store. Everything is lost on restart, which resets
/// every user to `Idle` and drops any deal in progress.
pub struct InMemSessionStore {
    sessions: DashMap<i64, SessionEntry>,
    idle_timeout: Option<Duration>,
}

impl InMemSessionStore {
    /// `idle_timeout` of `None` keeps sessions forever
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        match self.idle_timeout {
            Some(timeout) => now.duration_since(entry.touched_at) >= timeout,
            None => false,
        }
    }

    /// Drop every session idle for longer than the timeout.
    /// Returns the number of purged sessions.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions.retain(|user_id, entry| {
            let keep = !self.is_expired(entry, now);
            if !keep {
                debug!(
                    "Session of user {} expired in state {}",
                    user_id,
                    entry.state.name()
                );
            }
            keep
        });
        before.saturating_sub(self.sessions.len())
    }

    /// Number of users currently inside a wizard
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemSessionStore {
    async fn get(&self, user_id: i64) -> Result<State, BotError> {
        let now = Instant::now();
        let state = match self.sessions.get(&user_id) {
            Some(entry) if !self.is_expired(&entry, now) => entry.state.clone(),
            _ => State::Idle,
        };
        Ok(state)
    }

    async fn set(&self, user_id: i64, state: State) -> Result<(), BotError> {
        if state.is_idle() {
            self.sessions.remove(&user_id);
        } else {
            self.sessions.insert(
                user_id,
                SessionEntry {
                    state,
                    touched_at: Instant::now(),
                },
            );
        }
        Ok(())
    }

    async fn clear(&self, user_id: i64) -> Result<(), BotError> {
        self.sessions.remove(&user_id);
        Ok(())
    }

    async fn touch(&self, user_id: i64) -> Result<(), BotError> {
        let now = Instant::now();
        if let Some(mut entry) = self.sessions.get_mut(&user_id) {
            // an expired entry stays expired until the sweeper drops it
            if !self.is_expired(&entry, now) {
                entry.touched_at = now;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_is_idle() {
        let store = InMemSessionStore::new(None);
        assert_eq!(store.get(1).await.unwrap(), State::Idle);
    }

    #[tokio::test]
    async fn set_get_clear() {
        let store = InMemSessionStore::new(None);
        store.set(1, State::AwaitingPairName).await.unwrap();
        store.set(2, State::AwaitingDealPairChoice).await.unwrap();

        assert_eq!(store.get(1).await.unwrap(), State::AwaitingPairName);
        assert_eq!(store.get(2).await.unwrap(), State::AwaitingDealPairChoice);

        store.clear(1).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), State::Idle);
        assert_eq!(store.get(2).await.unwrap(), State::AwaitingDealPairChoice);
    }

    #[tokio::test]
    async fn setting_idle_removes_the_entry() {
        let store = InMemSessionStore::new(None);
        store.set(1, State::AwaitingPairName).await.unwrap();
        assert_eq!(store.active_sessions(), 1);

        store.set(1, State::Idle).await.unwrap();
        assert_eq!(store.active_sessions(), 0);
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = InMemSessionStore::new(Some(Duration::from_millis(20)));
        store
            .set(
                1,
                State::AwaitingAmount {
                    pair: "BTC".to_string(),
                },
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.get(1).await.unwrap(), State::Idle);
        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.active_sessions(), 0);
    }

    #[tokio::test]
    async fn touch_keeps_a_session_alive() {
        let store = InMemSessionStore::new(Some(Duration::from_millis(100)));
        store.set(1, State::AwaitingPairName).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        store.touch(1).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(store.get(1).await.unwrap(), State::AwaitingPairName);
        assert_eq!(store.purge_expired(), 0);
    }

    #[tokio::test]
    async fn touch_does_not_revive_expired_sessions() {
        let store = InMemSessionStore::new(Some(Duration::from_millis(20)));
        store.set(1, State::AwaitingPairName).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        store.touch(1).await.unwrap();
        store.touch(2).await.unwrap();

        assert_eq!(store.get(1).await.unwrap(), State::Idle);
        assert_eq!(store.active_sessions(), 1);
    }

    #[tokio::test]
    async fn fresh_sessions_survive_purge() {
        let store = InMemSessionStore::new(Some(Duration::from_secs(60)));
        store.set(1, State::AwaitingPairName).await.unwrap();

        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.get(1).await.unwrap(), State::AwaitingPairName);
    }
}
