//! Deadline tracking for polling loops.
//!
//! Built on `tokio::time::Instant` so paused-clock tests advance it.

use std::time::Duration;

use tokio::time::Instant;

/// A fixed time budget started at construction.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True once strictly more than the budget has elapsed.
    pub fn exceeded(&self) -> bool {
        self.elapsed() > self.budget
    }

    /// True once the budget has been used up (`now >= started + budget`).
    pub fn reached(&self) -> bool {
        self.elapsed() >= self.budget
    }
}
