//! Debounced scheduling for high-frequency events
//!
//! A single pending cancellable task: every `schedule` call aborts the
//! previous one, so only the last event in a burst runs its action.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` to run after the debounce delay, replacing any
    /// pending action.
    pub async fn schedule<Fut>(&self, action: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            tracing::trace!("Debounce reset, coalescing pending action");
            handle.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Drop any pending action without running it.
    pub async fn cancel(&self) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn settle() {
        // Let aborted/ready tasks run to completion on the paused runtime.
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_coalesces_event_burst() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let fired = Arc::new(AtomicU32::new(0));

        // Events at t=0ms, 100ms, 150ms.
        for offset in [0u64, 100, 50] {
            tokio::time::advance(Duration::from_millis(offset)).await;
            let fired = fired.clone();
            debouncer
                .schedule(async move {
                    fired.fetch_add(1, Ordering::SeqCst);
                })
                .await;
        }

        // At t=649ms nothing has fired yet.
        tokio::time::advance(Duration::from_millis(499)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        // At t=650ms exactly one action fires.
        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // And only one, ever.
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_action() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let fired = Arc::new(AtomicU32::new(0));

        let fired_clone = fired.clone();
        debouncer
            .schedule(async move {
                fired_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        debouncer.cancel().await;

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_event_fires_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(250));
        let fired = Arc::new(AtomicU32::new(0));

        let fired_clone = fired.clone();
        debouncer
            .schedule(async move {
                fired_clone.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        tokio::time::advance(Duration::from_millis(250)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
