//! Acquisition counters
//!
//! Cumulative counters for connection acquisition. r2d2 exposes only the
//! current connection counts, so the adapter records acquisitions itself.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// One consistent readout of the acquisition counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquireCounters {
    /// Successful acquisitions
    pub acquire_count: u64,

    /// Total wait across successful acquisitions
    pub acquire_duration: Duration,

    /// Acquisitions that timed out
    pub canceled_acquire_count: u64,

    /// Successful acquisitions that found no idle connection
    pub empty_acquire_count: u64,
}

/// Cumulative acquisition counters
///
/// Every field only grows. All fields sit behind one lock, so a
/// [`snapshot`](Self::snapshot) never sees an acquisition half-recorded.
#[derive(Debug, Default)]
pub struct AcquireMetrics {
    counters: Mutex<AcquireCounters>,
}

impl AcquireMetrics {
    /// Create a zeroed counter block
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful acquisition that took `wait`.
    ///
    /// `was_empty` marks an acquisition that started with no idle
    /// connection and had to wait for one to be released or built.
    pub fn record_acquired(&self, wait: Duration, was_empty: bool) {
        let mut counters = self.lock();
        counters.acquire_count += 1;
        counters.acquire_duration = counters.acquire_duration.saturating_add(wait);
        if was_empty {
            counters.empty_acquire_count += 1;
        }
    }

    /// Record an acquisition abandoned before a connection was handed out
    pub fn record_canceled(&self) {
        self.lock().canceled_acquire_count += 1;
    }

    /// Read every counter at once.
    pub fn snapshot(&self) -> AcquireCounters {
        *self.lock()
    }

    pub fn acquire_count(&self) -> u64 {
        self.snapshot().acquire_count
    }

    pub fn acquire_duration(&self) -> Duration {
        self.snapshot().acquire_duration
    }

    pub fn canceled_acquire_count(&self) -> u64 {
        self.snapshot().canceled_acquire_count
    }

    pub fn empty_acquire_count(&self) -> u64 {
        self.snapshot().empty_acquire_count
    }

    fn lock(&self) -> MutexGuard<'_, AcquireCounters> {
        match self.counters.lock() {
            Ok(guard) => guard,
            Err(poison_err) => {
                tracing::warn!("Acquire metrics mutex poisoned, recovering");
                poison_err.into_inner()
            }
        }
    }
}
