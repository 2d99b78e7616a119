//! View lifetime plumbing
//!
//! A [`ViewScope`] belongs to one mounted view. Fetches spawned through it
//! are cancelled when the view is torn down, and a fetch that was started
//! before the latest [`RefreshCounter::bump`] delivers nothing, so a slow
//! response can never overwrite newer state.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Generation counter; bumping it marks every in-flight fetch as stale and
/// wakes subscribers so they refetch
#[derive(Debug, Clone)]
pub struct RefreshCounter {
    tx: watch::Sender<u64>,
}

impl RefreshCounter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Start a new generation, returning it
    pub fn bump(&self) -> u64 {
        self.tx.send_modify(|generation| *generation += 1);
        self.current()
    }

    /// Receiver that changes on every bump
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for RefreshCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Task scope tied to a view's lifetime; dropping it cancels its tasks
#[derive(Debug)]
pub struct ViewScope {
    name: &'static str,
    token: CancellationToken,
    refresh: RefreshCounter,
}

impl ViewScope {
    pub fn new(name: &'static str) -> Self {
        Self::with_refresh(name, RefreshCounter::new())
    }

    /// Scope sharing a refresh counter, e.g. with a sibling detail view
    pub fn with_refresh(name: &'static str, refresh: RefreshCounter) -> Self {
        tracing::debug!(view = name, "View mounted");
        Self {
            name,
            token: CancellationToken::new(),
            refresh,
        }
    }

    pub fn refresh(&self) -> &RefreshCounter {
        &self.refresh
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!(view = self.name, "Cancelling view tasks");
            self.token.cancel();
        }
    }

    /// Run `fut` until the scope is cancelled.
    ///
    /// Resolves to `None` when cancelled, or when the refresh counter moved
    /// on while `fut` was running.
    pub fn spawn<F, T>(&self, fut: F) -> JoinHandle<Option<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let token = self.token.clone();
        let refresh = self.refresh.clone();
        let generation = refresh.current();
        let name = self.name;
        tokio::spawn(async move {
            let value = tokio::select! {
                _ = token.cancelled() => return None,
                value = fut => value,
            };
            if token.is_cancelled() {
                return None;
            }
            if refresh.current() != generation {
                tracing::debug!(view = name, generation, "Discarding superseded fetch");
                return None;
            }
            Some(value)
        })
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_completed_fetch_delivers() {
        let scope = ViewScope::new("goals");
        let handle = scope.spawn(async { 42 });
        assert_eq!(handle.await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_drop_cancels_outstanding_fetch() {
        let wrote = Arc::new(AtomicBool::new(false));
        let scope = ViewScope::new("holidays");
        let handle = scope.spawn({
            let wrote = wrote.clone();
            async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                wrote.store(true, Ordering::SeqCst);
            }
        });
        drop(scope);
        assert_eq!(handle.await.unwrap(), None);
        assert!(!wrote.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_discarded() {
        let scope = ViewScope::new("roles");
        let stale = scope.spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            "old"
        });
        scope.refresh().bump();
        let fresh = scope.spawn(async { "new" });

        assert_eq!(stale.await.unwrap(), None);
        assert_eq!(fresh.await.unwrap(), Some("new"));
    }

    #[tokio::test]
    async fn test_bump_wakes_subscribers() {
        let counter = RefreshCounter::new();
        let mut rx = counter.subscribe();
        assert_eq!(counter.bump(), 1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
    }

    #[tokio::test]
    async fn test_shared_counter_between_views() {
        let counter = RefreshCounter::new();
        let list = ViewScope::with_refresh("list", counter.clone());
        let detail = ViewScope::with_refresh("detail", counter);
        detail.refresh().bump();
        assert_eq!(list.refresh().current(), 1);
        list.cancel();
        assert!(list.is_cancelled());
        assert!(!detail.is_cancelled());
    }
}
