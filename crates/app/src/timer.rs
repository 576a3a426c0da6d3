//! One-shot deferred timers polled from the UI loop

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
pub struct OneShot {
    deadline: Option<Instant>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) to fire `delay` after `now`.
    pub fn start_at(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn start(&mut self, delay: Duration) {
        self.start_at(Instant::now(), delay);
    }

    /// Time left, zero once due. `None` when not armed.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn fire_if_due_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn fire_if_due(&mut self) -> bool {
        self.fire_if_due_at(Instant::now())
    }

    /// Block until the deadline; for modes without a UI loop.
    pub fn wait(&mut self) {
        if let Some(left) = self.remaining_at(Instant::now()) {
            std::thread::sleep(left);
        }
        self.deadline = None;
    }
}
