use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::session::{InMemSessionStore, UserLocks};

/// Background task that forces stuck wizards back to `Idle` and forgets
/// unused per-user locks
pub struct SessionSweeper {
    sessions: Arc<InMemSessionStore>,
    locks: Arc<UserLocks>,
    period: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
}

impl SessionSweeper {
    pub fn new(sessions: Arc<InMemSessionStore>, locks: Arc<UserLocks>, period: Duration) -> Self {
        Self {
            sessions,
            locks,
            period,
            stop_tx: None,
        }
    }

    pub fn start(&mut self) {
        if self.stop_tx.is_some() {
            warn!("Session sweeper is already running");
            return;
        }

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let sessions = self.sessions.clone();
        let locks = self.locks.clone();
        let period = self.period;

        tokio::spawn(async move {
            let mut ticker = interval(period);

            loop {
                select! {
                    _ = ticker.tick() => {
                        let (expired, pruned) = Self::sweep(&sessions, &locks);
                        debug!(
                            "Session sweep: {} expired, {} locks pruned, {} active",
                            expired,
                            pruned,
                            sessions.active_sessions()
                        );
                    }
                    _ = stop_rx.recv() => {
                        info!("Stopping session sweeper");
                        break;
                    }
                }
            }
        });

        info!("Session sweeper started");
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
            info!("Session sweeper stop signal sent");
        }
    }

    fn sweep(sessions: &InMemSessionStore, locks: &UserLocks) -> (usize, usize) {
        let expired = sessions.purge_expired();
        let pruned = locks.prune();
        if expired > 0 {
            info!("Reset {} idle wizard session(s)", expired);
        }
        (expired, pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::State;
    use crate::session::SessionStore;

    #[tokio::test]
    async fn sweeper_purges_expired_sessions() {
        let sessions = Arc::new(InMemSessionStore::new(Some(Duration::from_millis(10))));
        let locks = Arc::new(UserLocks::new());
        sessions.set(1, State::AwaitingPairName).await.unwrap();
        drop(locks.acquire(1).await);

        let mut sweeper =
            SessionSweeper::new(sessions.clone(), locks.clone(), Duration::from_millis(10));
        sweeper.start();
        tokio::time::sleep(Duration::from_millis(80)).await;
        sweeper.stop().await;

        assert_eq!(sessions.active_sessions(), 0);
        assert!(locks.is_empty());
    }
}
