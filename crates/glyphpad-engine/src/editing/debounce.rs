use std::time::{Duration, Instant};

/// Keyboard quiet time that ends a coalesced edit burst.
pub const QUIESCENCE_INTERVAL: Duration = Duration::from_millis(500);

/// Single-deadline debounce timer.
///
/// Re-arming replaces the pending deadline rather than stacking callbacks, so
/// at most one capture is ever pending. Time is passed in by the caller,
/// which keeps burst coalescing deterministic under test; the frontend feeds
/// it `Instant::now()` from its event loop.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Start, or restart, the quiescence window as of `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed; firing disarms.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(QUIESCENCE_INTERVAL)
    }
}
