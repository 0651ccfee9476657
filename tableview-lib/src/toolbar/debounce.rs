use std::time::Duration;

use log::trace;
use tokio::time::Instant;
use tokio::time::sleep_until;

/// A single pending value released once its deadline passes.
///
/// Scheduling again replaces the pending value and restarts the timer. The
/// pending value is dropped on `cancel` and when the debouncer itself is
/// dropped, so a stale value never fires after its owner is gone.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms (or re-arms) the timer with a new value.
    pub fn schedule(&mut self, value: T) {
        let deadline = Instant::now() + self.delay;
        if self.pending.replace((value, deadline)).is_some() {
            trace!("Debounce restarted");
        }
    }

    /// Releases the pending value if its deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if !self.deadline().is_some_and(|deadline| deadline <= now) {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// Drops the pending value. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Waits for the deadline and releases the pending value.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settle(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        sleep_until(deadline).await;
        self.pending.take().map(|(value, _)| value)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if self.cancel() {
            trace!("Debounce cancelled on drop");
        }
    }
}
