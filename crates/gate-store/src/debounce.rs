//! Quiescence timer for the automatic tier swap.
//!
//! Time is passed in by the caller, so the timer never sleeps or spawns.

use std::time::{Duration, Instant};

/// Default quiet period after the last dimension edit.
pub const DEFAULT_TIER_SWAP_DEBOUNCE: Duration = Duration::from_millis(800);

/// Holds at most one pending deadline. Every [`touch`](Self::touch) replaces
/// it, so only the last edit in a burst fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_TIER_SWAP_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an edit at `now`, restarting the quiet period.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire if the quiet period has elapsed. Fires at most once per deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire immediately if anything is pending.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_once_after_window() {
        let start = Instant::now();
        let mut d = Debouncer::default();
        assert!(!d.poll(start));

        d.touch(start);
        assert!(!d.poll(start + 799 * MS));
        assert!(d.poll(start + 800 * MS));
        assert!(!d.poll(start + 900 * MS));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_last_edit_wins() {
        let start = Instant::now();
        let mut d = Debouncer::new(100 * MS);
        d.touch(start);
        d.touch(start + 80 * MS);
        assert!(!d.poll(start + 150 * MS));
        assert!(d.poll(start + 180 * MS));
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut d = Debouncer::default();
        assert!(!d.flush());
        d.touch(start);
        assert!(d.flush());
        assert!(!d.poll(start + 10_000 * MS));

        d.touch(start);
        d.cancel();
        assert!(!d.flush());
    }
}
