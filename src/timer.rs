use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag that permanently stops a [`FrameTimer`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Repeating redraw timer owned by the host.
///
/// Each arm schedules one tick `interval` after the given instant. There is no
/// catch-up: a late frame pushes every following tick back.
#[derive(Debug)]
pub struct FrameTimer {
    interval: Duration,
    deadline: Option<Instant>,
    token: CancelToken,
}

impl FrameTimer {
    pub fn new(interval: Duration, token: CancelToken) -> Self {
        Self {
            interval,
            deadline: None,
            token,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn arm(&mut self, now: Instant) {
        if self.token.is_cancelled() {
            self.deadline = None;
            return;
        }
        self.deadline = Some(now + self.interval);
    }

    /// Next tick, if the timer is armed and still live.
    pub fn deadline(&self) -> Option<Instant> {
        if self.token.is_cancelled() {
            return None;
        }
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Consumes the pending tick if it is due.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.deadline = None;
        true
    }
}
