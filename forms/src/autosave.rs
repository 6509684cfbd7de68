//! Debounced draft autosave.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::draft::{load_or_none, Draft, DraftStore};

/// Saves a form's values a fixed delay after the last change.
///
/// Each [`schedule`](Self::schedule) supersedes the pending save, so a burst
/// of keystrokes produces one write. Must be used inside a Tokio runtime.
pub struct DraftAutosaver {
    store: Arc<dyn DraftStore>,
    key: String,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DraftAutosaver {
    pub fn new(store: Arc<dyn DraftStore>, key: impl Into<String>, delay: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Save `values` after the delay unless another change arrives first.
    pub fn schedule(&self, values: BTreeMap<String, String>) {
        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            save_logged(store.as_ref(), &key, values).await;
        });

        if let Some(previous) = self.replace_pending(Some(handle)) {
            previous.abort();
        }
        debug!(key = %self.key, delay_ms = self.delay.as_millis() as u64, "Scheduled draft save");
    }

    /// Save immediately, dropping any pending save.
    pub async fn flush(&self, values: BTreeMap<String, String>) {
        self.cancel();
        save_logged(self.store.as_ref(), &self.key, values).await;
    }

    /// Drop the pending save, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.replace_pending(None) {
            previous.abort();
        }
    }

    /// Whether a save is waiting on its delay.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|guard| guard.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// The stored draft, if one is readable.
    pub async fn restore(&self) -> Option<Draft> {
        load_or_none(self.store.as_ref(), &self.key).await
    }

    /// Cancel pending work and delete the draft, e.g. after a successful
    /// submission.
    pub async fn discard(&self) {
        self.cancel();
        if let Err(e) = self.store.discard(&self.key).await {
            warn!(key = %self.key, error = %e, "Failed to discard draft");
        }
    }

    fn replace_pending(&self, handle: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut guard = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *guard, handle)
    }
}

impl std::fmt::Debug for DraftAutosaver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftAutosaver")
            .field("key", &self.key)
            .field("delay", &self.delay)
            .finish()
    }
}

async fn save_logged(store: &dyn DraftStore, key: &str, values: BTreeMap<String, String>) {
    match store.save(key, &Draft::now(values)).await {
        Ok(()) => debug!(key = %key, "Draft saved"),
        Err(e) => warn!(key = %key, error = %e, "Draft save failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::MemoryDraftStore;

    fn values(name: &str) -> BTreeMap<String, String> {
        [("full_name".to_string(), name.to_string())].into_iter().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_values_win() {
        let store = Arc::new(MemoryDraftStore::new());
        let saver = DraftAutosaver::new(store.clone(), "profile", Duration::from_millis(500));

        saver.schedule(values("A"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        saver.schedule(values("As"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        saver.schedule(values("Asha"));
        assert!(store.is_empty().await);

        tokio::time::sleep(Duration::from_millis(600)).await;
        let draft = saver.restore().await.unwrap();
        assert_eq!(draft.values["full_name"], "Asha");
        assert!(!saver.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_flush() {
        let store = Arc::new(MemoryDraftStore::new());
        let saver = DraftAutosaver::new(store.clone(), "profile", Duration::from_millis(500));

        saver.schedule(values("Ravi"));
        saver.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(saver.restore().await.is_none());

        saver.schedule(values("Ravi"));
        saver.flush(values("Ravi K")).await;
        assert_eq!(saver.restore().await.unwrap().values["full_name"], "Ravi K");

        saver.discard().await;
        assert!(store.is_empty().await);
    }
}
