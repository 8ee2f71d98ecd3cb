//! Shared fakes for collector integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use poolstat_core::PoolStatsPort;
use poolstat_domain::PoolStat;

/// Pool returning a fixed snapshot that tests can swap.
#[derive(Debug, Default)]
pub struct StaticPool {
    stat: Mutex<PoolStat>,
}

impl StaticPool {
    pub fn new(stat: PoolStat) -> Self {
        Self { stat: Mutex::new(stat) }
    }

    pub fn set(&self, stat: PoolStat) {
        *self.stat.lock().expect("static pool mutex poisoned") = stat;
    }
}

impl PoolStatsPort for StaticPool {
    fn stat(&self) -> PoolStat {
        *self.stat.lock().expect("static pool mutex poisoned")
    }
}

/// Pool whose every snapshot has all fields equal to a tick that advances
/// on each `stat` call. A torn sample set shows up as unequal values.
#[derive(Debug, Default)]
pub struct TickingPool {
    tick: AtomicU64,
}

impl TickingPool {
    pub fn ticks(&self) -> u64 {
        self.tick.load(Ordering::SeqCst)
    }
}

impl PoolStatsPort for TickingPool {
    fn stat(&self) -> PoolStat {
        let n = self.tick.fetch_add(1, Ordering::SeqCst) + 1;
        let conns = u32::try_from(n).unwrap_or(u32::MAX);
        PoolStat {
            acquire_count: n,
            acquire_duration: Duration::from_secs(n),
            acquired_conns: conns,
            canceled_acquire_count: n,
            constructing_conns: conns,
            empty_acquire_count: n,
            idle_conns: conns,
            max_conns: conns,
            total_conns: conns,
        }
    }
}

/// Snapshot used by the end-to-end examples.
pub fn example_stat() -> PoolStat {
    PoolStat {
        acquire_count: 10,
        acquire_duration: Duration::from_secs(2),
        acquired_conns: 1,
        canceled_acquire_count: 0,
        constructing_conns: 0,
        empty_acquire_count: 3,
        idle_conns: 4,
        max_conns: 5,
        total_conns: 5,
    }
}
