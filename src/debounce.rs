//! Keyed Trailing-Edge Debouncing
//!
//! Collapses bursts of calls under the same key into a single execution of
//! the most recent one, after a quiet window. One key's timer never
//! disturbs another's, which is what lets a form debounce each field
//! independently. Scheduling happens on the ambient tokio runtime.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `action` to run after the window. A pending action under
    /// the same key is aborted first, so only the trailing call of a burst
    /// ever executes.
    pub fn call<F>(&self, key: impl Into<String>, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let key = key.into();
        let window = self.window;
        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.remove(&key) {
            previous.abort();
        }
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            action();
        });
        pending.insert(key, handle);
    }

    /// Aborts the pending action for one key. Returns whether one was
    /// still waiting to fire.
    pub fn cancel(&self, key: &str) -> bool {
        match self.pending.lock().unwrap().remove(key) {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                was_waiting
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, handle) in self.pending.lock().unwrap().drain() {
            handle.abort();
        }
    }

    /// True while a scheduled action has not yet fired or been aborted.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending
            .lock()
            .unwrap()
            .get(key)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(300);

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn bump(counter: &Arc<AtomicUsize>) -> impl FnOnce() + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_window() {
        let debouncer = Debouncer::new(WINDOW);
        let fired = counter();

        debouncer.call("x", bump(&fired));
        assert!(debouncer.is_pending("x"));

        sleep(WINDOW + Duration::from_millis(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending("x"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_trailing_call() {
        let debouncer = Debouncer::new(WINDOW);
        let first = counter();
        let second = counter();

        debouncer.call("x", bump(&first));
        sleep(Duration::from_millis(100)).await;
        debouncer.call("x", bump(&second));

        sleep(WINDOW + Duration::from_millis(10)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_do_not_clobber_each_other() {
        let debouncer = Debouncer::new(WINDOW);
        let for_a = counter();
        let for_b = counter();

        debouncer.call("a", bump(&for_a));
        debouncer.call("b", bump(&for_b));

        sleep(WINDOW + Duration::from_millis(10)).await;
        assert_eq!(for_a.load(Ordering::SeqCst), 1);
        assert_eq!(for_b.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_action() {
        let debouncer = Debouncer::new(WINDOW);
        let fired = counter();

        debouncer.call("x", bump(&fired));
        assert!(debouncer.cancel("x"));
        assert!(!debouncer.cancel("x"));

        sleep(WINDOW * 2).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_everything() {
        let fired = counter();
        {
            let debouncer = Debouncer::new(WINDOW);
            debouncer.call("x", bump(&fired));
        }
        sleep(WINDOW * 2).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
