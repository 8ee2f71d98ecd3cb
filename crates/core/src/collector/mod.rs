//! Pool statistics collector
//!
//! [`PoolStatsCollector`] implements the metrics client's two-method
//! contract:
//! - `desc` returns the metadata of every catalogue entry, no snapshot needed
//! - `collect` takes one snapshot and emits one sample per catalogue entry
//!
//! The catalogue is immutable after construction and every `collect` call
//! works on its own snapshot, so concurrent scrapes need no locking here.

mod catalogue;
mod error;

use std::fmt;
use std::sync::Arc;

use poolstat_domain::PoolStat;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::Registry;
use tracing::{debug, trace};

pub use catalogue::{build_catalogue, MetricDefinition, MetricSample, StatField};
pub use error::{CollectorError, CollectorResult};

use crate::pool_stats_ports::PoolStatsPort;

/// Publishes a pool's statistics as nine Prometheus metrics
///
/// The pool is shared: the collector keeps an `Arc` and never manages it.
pub struct PoolStatsCollector<P: ?Sized = dyn PoolStatsPort> {
    namespace: String,
    pool: Arc<P>,
    catalogue: Vec<MetricDefinition>,
}

impl<P: PoolStatsPort + ?Sized> PoolStatsCollector<P> {
    /// Build a collector for `pool` with metric names prefixed by
    /// `namespace`. Does not register anything.
    ///
    /// # Errors
    /// Returns `CollectorError::InvalidMetricName` if `namespace` cannot
    /// prefix a metric name.
    pub fn new(namespace: &str, pool: Arc<P>) -> CollectorResult<Self> {
        let catalogue = build_catalogue(namespace)?;
        debug!(namespace, metrics = catalogue.len(), "Built pool statistics catalogue");

        Ok(Self { namespace: namespace.to_string(), pool, catalogue })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn definitions(&self) -> &[MetricDefinition] {
        &self.catalogue
    }

    /// Fetch one snapshot and evaluate every definition against it.
    pub fn samples(&self) -> Vec<MetricSample<'_>> {
        let stat = self.pool.stat();
        self.samples_from(&stat)
    }

    /// Evaluate every definition against `stat`, in catalogue order.
    pub fn samples_from(&self, stat: &PoolStat) -> Vec<MetricSample<'_>> {
        self.catalogue.iter().map(|def| def.sample(stat)).collect()
    }
}

impl<P: PoolStatsPort + ?Sized + 'static> PoolStatsCollector<P> {
    /// Register this collector with `registry`.
    ///
    /// # Errors
    /// Returns `CollectorError::Registration` if the registry rejects it,
    /// e.g. because another collector already owns one of the names.
    pub fn register(self, registry: &Registry) -> CollectorResult<()> {
        let namespace = self.namespace.clone();
        registry.register(Box::new(self)).map_err(CollectorError::Registration)?;
        debug!(namespace = %namespace, "Registered pool statistics collector");
        Ok(())
    }
}

impl<P: PoolStatsPort + ?Sized> Collector for PoolStatsCollector<P> {
    fn desc(&self) -> Vec<&Desc> {
        self.catalogue.iter().map(MetricDefinition::desc).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let families: Vec<MetricFamily> = self
            .samples()
            .into_iter()
            .zip(&self.catalogue)
            .map(|(sample, def)| def.family(sample.value))
            .collect();

        trace!(namespace = %self.namespace, metrics = families.len(), "Collected pool statistics");
        families
    }
}

impl<P: ?Sized> fmt::Debug for PoolStatsCollector<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolStatsCollector")
            .field("namespace", &self.namespace)
            .field("metrics", &self.catalogue.len())
            .finish_non_exhaustive()
    }
}

/// Build a collector for `pool` and register it with `registry` in one step.
///
/// # Errors
/// Returns `CollectorError` if the namespace is invalid or the registry
/// rejects the collector.
pub fn register_pool_collector<P>(
    registry: &Registry,
    namespace: &str,
    pool: Arc<P>,
) -> CollectorResult<()>
where
    P: PoolStatsPort + ?Sized + 'static,
{
    PoolStatsCollector::new(namespace, pool)?.register(registry)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use poolstat_domain::ValueKind;

    use super::*;

    /// Pool whose snapshot is set by the test; counts `stat` calls.
    #[derive(Default)]
    struct FakePool {
        stat: Mutex<PoolStat>,
        calls: AtomicU64,
    }

    impl FakePool {
        fn with(stat: PoolStat) -> Self {
            Self { stat: Mutex::new(stat), calls: AtomicU64::new(0) }
        }

        fn set(&self, stat: PoolStat) {
            *self.stat.lock().unwrap() = stat;
        }

        fn calls(&self) -> u64 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PoolStatsPort for FakePool {
        fn stat(&self) -> PoolStat {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.stat.lock().unwrap()
        }
    }

    fn example_stat() -> PoolStat {
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

    #[test]
    fn test_example_scrape() {
        let pool = Arc::new(FakePool::with(example_stat()));
        let collector = PoolStatsCollector::new("app", pool).unwrap();

        let rendered: Vec<String> = collector.samples().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "app_pgx_acquire_count=10(counter)",
                "app_pgx_acquire_duration=2(counter)",
                "app_pgx_acquire_conns=1(gauge)",
                "app_pgx_canceled_acquire_count=0(counter)",
                "app_pgx_constructing_conns=0(gauge)",
                "app_pgx_empty_acquire_count=3(counter)",
                "app_pgx_idle_conns=4(gauge)",
                "app_pgx_max_conns=5(gauge)",
                "app_pgx_total_conns=5(gauge)",
            ]
        );
    }

    #[test]
    fn test_construction_does_not_touch_pool() {
        let pool = Arc::new(FakePool::default());
        let collector = PoolStatsCollector::new("app", Arc::clone(&pool)).unwrap();
        assert_eq!(collector.desc().len(), 9);
        assert_eq!(pool.calls(), 0);
    }

    #[test]
    fn test_collect_fetches_one_snapshot() {
        let pool = Arc::new(FakePool::with(example_stat()));
        let collector = PoolStatsCollector::new("app", Arc::clone(&pool)).unwrap();

        let families = collector.collect();
        assert_eq!(families.len(), 9);
        assert_eq!(pool.calls(), 1);

        collector.collect();
        assert_eq!(pool.calls(), 2);
    }

    #[test]
    fn test_desc_and_samples_share_order() {
        let pool = Arc::new(FakePool::with(example_stat()));
        let collector = PoolStatsCollector::new("", pool).unwrap();

        let described: Vec<&str> = collector.desc().iter().map(|d| d.fq_name.as_str()).collect();
        for _ in 0..3 {
            let sampled: Vec<&str> = collector.samples().iter().map(|s| s.name).collect();
            assert_eq!(described, sampled);
        }
        assert!(described.iter().all(|name| name.starts_with("pgx_")));
    }

    #[test]
    fn test_total_conns_not_recomputed() {
        let pool = Arc::new(FakePool::with(PoolStat {
            constructing_conns: 2,
            acquired_conns: 3,
            idle_conns: 5,
            total_conns: 11,
            ..PoolStat::default()
        }));
        let collector = PoolStatsCollector::new("app", pool).unwrap();

        let total =
            collector.samples().into_iter().find(|s| s.name == "app_pgx_total_conns").unwrap();
        assert_eq!(total.value, 11.0);
    }

    #[test]
    fn test_counters_non_decreasing_across_scrapes() {
        let pool = Arc::new(FakePool::with(example_stat()));
        let collector = PoolStatsCollector::new("app", Arc::clone(&pool)).unwrap();

        let first: Vec<f64> = collector.samples().iter().map(|s| s.value).collect();
        pool.set(PoolStat {
            acquire_count: 25,
            acquire_duration: Duration::from_millis(3500),
            canceled_acquire_count: 1,
            empty_acquire_count: 7,
            acquired_conns: 0,
            idle_conns: 2,
            ..example_stat()
        });
        let second = collector.samples();

        for (before, after) in first.iter().zip(&second) {
            if after.kind == ValueKind::Counter {
                assert!(after.value >= *before, "{} went backwards", after.name);
            }
        }
        // Gauges may fall.
        assert!(second[2].value < first[2]);
    }

    #[test]
    fn test_invalid_namespace() {
        let result = PoolStatsCollector::new("my app", Arc::new(FakePool::default()));
        assert!(matches!(result, Err(CollectorError::InvalidMetricName { .. })));
    }

    #[test]
    fn test_works_through_trait_object() {
        let pool: Arc<dyn PoolStatsPort> = Arc::new(FakePool::with(example_stat()));
        let collector: PoolStatsCollector = PoolStatsCollector::new("app", pool).unwrap();
        assert_eq!(collector.samples()[0].value, 10.0);
    }

    #[test]
    fn test_register_twice_is_duplicate() {
        let registry = Registry::new();
        let pool = Arc::new(FakePool::with(example_stat()));

        register_pool_collector(&registry, "app", Arc::clone(&pool)).unwrap();
        let err = register_pool_collector(&registry, "app", pool).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_debug_omits_pool() {
        let collector = PoolStatsCollector::new("app", Arc::new(FakePool::default())).unwrap();
        let debug = format!("{collector:?}");
        assert!(debug.contains("namespace: \"app\""));
        assert!(debug.contains("metrics: 9"));
    }
}
