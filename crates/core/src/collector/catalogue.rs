//! Metric catalogue
//!
//! Nine scalar metrics, one per [`PoolStat`] field. Each entry is a
//! [`StatField`] selector paired with a validated [`Desc`]. The list is
//! built once per collector and only read afterwards.

use std::collections::HashMap;
use std::fmt;

use poolstat_domain::constants::{METRIC_COUNT, SUBSYSTEM};
use poolstat_domain::{PoolStat, ValueKind};
use prometheus::core::Desc;
use prometheus::proto::{self, MetricFamily, MetricType};
use prometheus::Opts;

use super::error::{CollectorError, CollectorResult};

/// Selects one field of a [`PoolStat`] snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    AcquireCount,
    AcquireDuration,
    AcquiredConns,
    CanceledAcquireCount,
    ConstructingConns,
    EmptyAcquireCount,
    IdleConns,
    MaxConns,
    TotalConns,
}

impl StatField {
    /// Catalogue order. `desc` and `collect` both follow it.
    pub const ALL: [Self; METRIC_COUNT] = [
        Self::AcquireCount,
        Self::AcquireDuration,
        Self::AcquiredConns,
        Self::CanceledAcquireCount,
        Self::ConstructingConns,
        Self::EmptyAcquireCount,
        Self::IdleConns,
        Self::MaxConns,
        Self::TotalConns,
    ];

    /// Metric name suffix after `{namespace}_pgx_`
    pub fn suffix(self) -> &'static str {
        match self {
            Self::AcquireCount => "acquire_count",
            Self::AcquireDuration => "acquire_duration",
            Self::AcquiredConns => "acquire_conns",
            Self::CanceledAcquireCount => "canceled_acquire_count",
            Self::ConstructingConns => "constructing_conns",
            Self::EmptyAcquireCount => "empty_acquire_count",
            Self::IdleConns => "idle_conns",
            Self::MaxConns => "max_conns",
            Self::TotalConns => "total_conns",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::AcquireCount => "The cumulative count of successful acquires from the pool.",
            Self::AcquireDuration => {
                "The total duration of all successful acquires from the pool, in seconds."
            }
            Self::AcquiredConns => "The number of currently acquired connections in the pool.",
            Self::CanceledAcquireCount => {
                "The cumulative count of acquires from the pool that were canceled before \
                 completing."
            }
            Self::ConstructingConns => {
                "The number of connections with construction in progress in the pool."
            }
            Self::EmptyAcquireCount => {
                "The cumulative count of successful acquires from the pool that waited for a \
                 connection to be released or constructed because the pool was empty."
            }
            Self::IdleConns => "The number of currently idle connections in the pool.",
            Self::MaxConns => "The maximum size of the pool.",
            Self::TotalConns => {
                "The total number of connections currently in the pool. The value is the sum \
                 of constructing_conns, acquire_conns, and idle_conns."
            }
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            Self::AcquireCount
            | Self::AcquireDuration
            | Self::CanceledAcquireCount
            | Self::EmptyAcquireCount => ValueKind::Counter,
            Self::AcquiredConns
            | Self::ConstructingConns
            | Self::IdleConns
            | Self::MaxConns
            | Self::TotalConns => ValueKind::Gauge,
        }
    }

    /// Read this field from `stat` as a float.
    ///
    /// Durations are converted to seconds; every other field is widened.
    #[allow(clippy::cast_precision_loss)]
    pub fn extract(self, stat: &PoolStat) -> f64 {
        match self {
            Self::AcquireCount => stat.acquire_count as f64,
            Self::AcquireDuration => stat.acquire_duration.as_secs_f64(),
            Self::AcquiredConns => f64::from(stat.acquired_conns),
            Self::CanceledAcquireCount => stat.canceled_acquire_count as f64,
            Self::ConstructingConns => f64::from(stat.constructing_conns),
            Self::EmptyAcquireCount => stat.empty_acquire_count as f64,
            Self::IdleConns => f64::from(stat.idle_conns),
            Self::MaxConns => f64::from(stat.max_conns),
            Self::TotalConns => f64::from(stat.total_conns),
        }
    }
}

/// One value read from a snapshot, tagged with its metric identity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample<'a> {
    pub name: &'a str,
    pub kind: ValueKind,
    pub value: f64,
}

impl fmt::Display for MetricSample<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}({})", self.name, self.value, self.kind)
    }
}

/// A published metric: identity, help text, kind, and the field it reads
#[derive(Debug, Clone)]
pub struct MetricDefinition {
    field: StatField,
    desc: Desc,
}

impl MetricDefinition {
    /// Build the definition for `field` under `namespace`.
    ///
    /// An empty namespace drops the prefix, giving `pgx_<suffix>`.
    ///
    /// # Errors
    /// Returns `CollectorError::InvalidMetricName` when the namespace makes
    /// the fully-qualified name invalid.
    pub fn new(namespace: &str, field: StatField) -> CollectorResult<Self> {
        let opts =
            Opts::new(field.suffix(), field.help()).namespace(namespace).subsystem(SUBSYSTEM);
        let name = opts.fq_name();

        let desc = Desc::new(name.clone(), opts.help, Vec::new(), HashMap::new())
            .map_err(|source| CollectorError::InvalidMetricName { name, source })?;

        Ok(Self { field, desc })
    }

    pub fn field(&self) -> StatField {
        self.field
    }

    /// Fully-qualified metric name
    pub fn name(&self) -> &str {
        &self.desc.fq_name
    }

    pub fn help(&self) -> &str {
        &self.desc.help
    }

    pub fn kind(&self) -> ValueKind {
        self.field.kind()
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// Evaluate this definition against `stat`.
    pub fn sample(&self, stat: &PoolStat) -> MetricSample<'_> {
        MetricSample { name: self.name(), kind: self.kind(), value: self.field.extract(stat) }
    }

    /// Wrap `value` as a single unlabelled sample family.
    pub(crate) fn family(&self, value: f64) -> MetricFamily {
        let mut metric = proto::Metric::default();
        let field_type = match self.kind() {
            ValueKind::Counter => {
                let mut counter = proto::Counter::default();
                counter.set_value(value);
                metric.set_counter(counter);
                MetricType::COUNTER
            }
            ValueKind::Gauge => {
                let mut gauge = proto::Gauge::default();
                gauge.set_value(value);
                metric.set_gauge(gauge);
                MetricType::GAUGE
            }
        };

        let mut family = MetricFamily::default();
        family.set_name(self.desc.fq_name.clone());
        family.set_help(self.desc.help.clone());
        family.set_field_type(field_type);
        family.mut_metric().push(metric);
        family
    }
}

/// Build the full catalogue for `namespace`, in [`StatField::ALL`] order.
///
/// # Errors
/// Returns `CollectorError::InvalidMetricName` for an invalid namespace.
pub fn build_catalogue(namespace: &str) -> CollectorResult<Vec<MetricDefinition>> {
    StatField::ALL.iter().map(|&field| MetricDefinition::new(namespace, field)).collect()
}
