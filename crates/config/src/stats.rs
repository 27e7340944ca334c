//! Pluggable statistics sink for consumer telemetry.
//!
//! The consumer reports operational counters and timings through the
//! [`StatReceiver`] trait. Two implementations are included:
//!
//! - [`NoopStatReceiver`]: the default, discards everything.
//! - [`MetricsStatReceiver`]: forwards to the [`metrics`](https://docs.rs/metrics) facade, so
//!   whatever recorder the process installs (Prometheus, StatsD, ...) receives the values.
//!
//! # Metric Names
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `shardline_checkpoints_total` | Counter | | Checkpoint writes |
//! | `shardline_event_delivery_seconds` | Histogram | | Time from insertion into the stream to delivery to the client |
//! | `shardline_events_received_total` | Counter | `shard_id` | Records fetched from the stream |
//! | `shardline_shard_lag_seconds` | Gauge | `shard_id` | How far behind the stream tip a shard is |

use std::{fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};

/// Receives operational statistics from shard workers and the coordinator.
///
/// All methods default to no-ops, so implementations only override the
/// events they care about.
///
/// # Thread Safety
///
/// A single receiver is shared by every worker, so implementations must be
/// `Send + Sync`.
pub trait StatReceiver: Send + Sync + fmt::Debug {
    /// Records a checkpoint write.
    fn checkpoint(&self) {}

    /// Records a record handed to the client.
    ///
    /// - `inserted`: when the record was appended to the stream.
    /// - `retrieved`: when the client received it.
    fn event_to_client(&self, inserted: DateTime<Utc>, retrieved: DateTime<Utc>) {
        let _ = (inserted, retrieved);
    }

    /// Records a batch of records fetched from one shard.
    ///
    /// - `count`: number of records in the batch.
    /// - `shard_id`: the shard they were read from.
    /// - `lag`: distance between the batch and the tip of the shard.
    fn events_from_stream(&self, count: usize, shard_id: &str, lag: Duration) {
        let _ = (count, shard_id, lag);
    }
}

/// Statistics sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStatReceiver;

impl StatReceiver for NoopStatReceiver {}

/// Statistics sink backed by the `metrics` crate facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsStatReceiver;

mod metric_names {
    pub const CHECKPOINTS_TOTAL: &str = "shardline_checkpoints_total";
    pub const EVENT_DELIVERY: &str = "shardline_event_delivery_seconds";
    pub const EVENTS_RECEIVED_TOTAL: &str = "shardline_events_received_total";
    pub const SHARD_LAG: &str = "shardline_shard_lag_seconds";
}

impl StatReceiver for MetricsStatReceiver {
    fn checkpoint(&self) {
        metrics::counter!(metric_names::CHECKPOINTS_TOTAL).increment(1);
    }

    fn event_to_client(&self, inserted: DateTime<Utc>, retrieved: DateTime<Utc>) {
        // Clock skew between producer and consumer can make this negative.
        let delay = (retrieved - inserted).to_std().unwrap_or_default();
        metrics::histogram!(metric_names::EVENT_DELIVERY).record(delay.as_secs_f64());
    }

    fn events_from_stream(&self, count: usize, shard_id: &str, lag: Duration) {
        metrics::counter!(metric_names::EVENTS_RECEIVED_TOTAL, "shard_id" => shard_id.to_owned())
            .increment(count as u64);
        metrics::gauge!(metric_names::SHARD_LAG, "shard_id" => shard_id.to_owned())
            .set(lag.as_secs_f64());
    }
}

/// Creates the default statistics sink (no-op).
pub(crate) fn default_stats() -> Arc<dyn StatReceiver> {
    Arc::new(NoopStatReceiver)
}
