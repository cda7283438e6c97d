use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, Mutex};

use crate::config::Config;
use crate::srs::ReviewClock;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    clock: Arc<dyn ReviewClock>,
    config: Arc<Config>,
    shutdown_tx: broadcast::Sender<()>,
    started_at: Instant,
    learner_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl AppState {
    pub fn new(
        store: Arc<Store>,
        clock: Arc<dyn ReviewClock>,
        config: &Config,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            store,
            clock,
            config: Arc::new(config.clone()),
            shutdown_tx,
            started_at: Instant::now(),
            learner_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn clock(&self) -> &dyn ReviewClock {
        self.clock.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shutdown_rx(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Mutex serializing the load-modify-store cycle for one learner's
    /// review collection. Two concurrent outcome recordings for the same
    /// learner must not interleave, or the second load would overwrite the
    /// first update.
    pub async fn learner_lock(&self, learner_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.learner_locks.lock().await;
        locks
            .entry(learner_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::broadcast;

    use crate::config::Config;
    use crate::srs::SystemClock;
    use crate::store::Store;

    use super::*;

    fn test_state(dir: &std::path::Path) -> AppState {
        let store = Arc::new(Store::open(dir.join("state.sled").to_str().unwrap()).unwrap());
        let (tx, _) = broadcast::channel(4);
        let config = Config::from_env();
        AppState::new(store, Arc::new(SystemClock), &config, tx)
    }

    #[tokio::test]
    async fn learner_lock_is_shared_per_learner() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = test_state(tmp.path());

        let a = state.learner_lock("u1").await;
        let b = state.learner_lock("u1").await;
        let other = state.learner_lock("u2").await;

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));

        // Holding u1's lock must not block u2.
        let _guard = a.lock().await;
        let _other_guard = other.lock().await;
    }

    #[tokio::test]
    async fn shutdown_receiver_can_clone() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = test_state(tmp.path());

        let mut rx1 = state.shutdown_rx();
        let mut rx2 = state.shutdown_rx();
        state.shutdown_tx.send(()).unwrap();
        rx1.recv().await.unwrap();
        rx2.recv().await.unwrap();
    }
}
