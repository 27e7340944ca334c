//! Test configuration helpers.
//!
//! Centralises the values tests use so option tweaks stay in one place.

use std::{sync::Arc, time::Duration};

use shardline_config::ConsumerConfig;

use crate::sinks::{RecordingLogger, RecordingStatReceiver};

/// Returns a valid configuration with short intervals for fast tests.
///
/// - `throttle_delay`: 200ms (the floor)
/// - `commit_frequency`: 10ms
/// - `shard_check_frequency` and `leader_action_frequency`: 50ms
/// - `checkpoint_waiter_delay`: 10ms
#[must_use]
pub fn test_consumer_config() -> ConsumerConfig {
    ConsumerConfig::new()
        .with_throttle_delay(Duration::from_millis(200))
        .with_commit_frequency(Duration::from_millis(10))
        .with_shard_check_frequency(Duration::from_millis(50))
        .with_leader_action_frequency(Duration::from_millis(50))
        .with_checkpoint_waiter_delay(Duration::from_millis(10))
}

/// Sinks attached by [`recording_config`], kept so tests can inspect them.
#[derive(Debug, Clone)]
pub struct RecordingSinks {
    /// Statistics receiver attached to the configuration.
    pub stats: Arc<RecordingStatReceiver>,
    /// Logger attached to the configuration.
    pub logger: Arc<RecordingLogger>,
}

/// Returns [`test_consumer_config`] with recording sinks attached.
#[must_use]
pub fn recording_config() -> (ConsumerConfig, RecordingSinks) {
    let stats = Arc::new(RecordingStatReceiver::default());
    let logger = Arc::new(RecordingLogger::default());
    let config = test_consumer_config()
        .with_stats(Some(stats.clone()))
        .with_logger(Some(logger.clone()));
    (config, RecordingSinks { stats, logger })
}
