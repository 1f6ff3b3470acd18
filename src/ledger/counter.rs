//! Per-target atomic counters.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::client::TargetId;

/// Confirmed-write counters keyed by target.
#[derive(Debug, Clone, Default)]
pub struct WriteCounters {
    inner: Arc<DashMap<TargetId, Arc<AtomicI64>>>,
}

impl WriteCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter for `target`, created at zero on first use.
    fn counter(&self, target: &TargetId) -> Arc<AtomicI64> {
        if let Some(counter) = self.inner.get(target) {
            return Arc::clone(counter.value());
        }
        let counter = self
            .inner
            .entry(target.clone())
            .or_insert_with(|| Arc::new(AtomicI64::new(0)));
        Arc::clone(counter.value())
    }

    /// Add one confirmed write and return the new total.
    pub fn increment(&self, target: &TargetId) -> i64 {
        self.counter(target).fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current total; zero for a target never written to.
    pub fn get(&self, target: &TargetId) -> i64 {
        self.inner
            .get(target)
            .map(|counter| counter.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}
