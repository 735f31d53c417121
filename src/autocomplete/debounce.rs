//! Latest-wins debouncing of a changing value

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Holds back updates until the input has been quiet for `delay`
///
/// The derived value starts out equal to the initial input. Every
/// [`update`](Debouncer::update) restarts the quiet period and replaces any
/// pending value. No task or timer is spawned; the wait happens inside
/// [`settle`](Debouncer::settle), so dropping the debouncer (or the `settle`
/// future) leaves nothing behind.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    current: T,
    pending: Option<T>,
    deadline: Instant,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            current: initial,
            pending: None,
            deadline: Instant::now(),
        }
    }

    /// The last value that made it through the quiet period
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the pending value and restart the quiet period
    pub fn update(&mut self, value: T) {
        self.pending = Some(value);
        self.deadline = Instant::now() + self.delay;
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Wait for the pending value to become current.
    ///
    /// Resolves with `Some(value)` when the settled value differs from the
    /// previous derived value and `None` when it does not. Never resolves
    /// while nothing is pending. Cancel safe: state only changes after the
    /// deadline has passed.
    pub async fn settle(&mut self) -> Option<T> {
        if self.pending.is_none() {
            return std::future::pending().await;
        }

        // An update during the sleep pushes the deadline further out.
        while Instant::now() < self.deadline {
            sleep_until(self.deadline).await;
        }

        let value = self.pending.take()?;
        if value == self.current {
            return None;
        }
        self.current = value.clone();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};
    use tokio_test::{assert_pending, assert_ready_eq, task};

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_initial_value_is_immediate() {
        let debouncer = Debouncer::new("test".to_string(), DELAY);
        assert_eq!(debouncer.current(), "test");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_propagates_after_delay() {
        let mut debouncer = Debouncer::new("initial".to_string(), DELAY);
        debouncer.update("updated".to_string());
        assert_eq!(debouncer.current(), "initial");

        let start = Instant::now();
        let settled = debouncer.settle().await;

        assert_eq!(settled.as_deref(), Some("updated"));
        assert_eq!(debouncer.current(), "updated");
        assert!(start.elapsed() >= DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_yield_only_the_last() {
        let mut debouncer = Debouncer::new("first".to_string(), DELAY);

        debouncer.update("second".to_string());
        advance(Duration::from_millis(100)).await;
        debouncer.update("third".to_string());
        advance(Duration::from_millis(100)).await;
        debouncer.update("fourth".to_string());
        assert_eq!(debouncer.current(), "first");

        assert_eq!(debouncer.settle().await.as_deref(), Some("fourth"));
        assert!(!debouncer.is_pending());

        // Nothing left to deliver.
        assert!(timeout(Duration::from_secs(5), debouncer.settle()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_delay() {
        let mut debouncer = Debouncer::new(1u32, Duration::from_millis(500));
        debouncer.update(2);

        {
            let mut settle = task::spawn(debouncer.settle());
            assert_pending!(settle.poll());
            advance(Duration::from_millis(300)).await;
            assert_pending!(settle.poll());
            advance(Duration::from_millis(200)).await;
            assert_ready_eq!(settle.poll(), Some(2));
        }

        assert_eq!(*debouncer.current(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_is_not_reported() {
        let mut debouncer = Debouncer::new("same".to_string(), DELAY);
        debouncer.update("other".to_string());
        debouncer.update("same".to_string());

        assert_eq!(debouncer.settle().await, None);
        assert_eq!(debouncer.current(), "same");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending() {
        let mut debouncer = Debouncer::new(0u8, DELAY);
        debouncer.update(9);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert!(timeout(DELAY * 2, debouncer.settle()).await.is_err());
        assert_eq!(*debouncer.current(), 0);
    }
}
