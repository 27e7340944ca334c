//! Consumer configuration with chainable modifiers.
//!
//! [`ConsumerConfig`] is an immutable value. Every `with_*` method returns a
//! new configuration with one option changed and leaves the receiver as it
//! was. Modifiers never fail: out-of-range values are accepted here and
//! rejected later by [`ConsumerConfig::validate`].
//!
//! # Example
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//!
//! use shardline_config::{ConsumerConfig, MetricsStatReceiver, TracingLogger};
//!
//! let config = ConsumerConfig::new()
//!     .with_throttle_delay(Duration::from_millis(500))
//!     .with_buffer_size(1_000)
//!     .with_stats(Some(Arc::new(MetricsStatReceiver)))
//!     .with_logger(Some(Arc::new(TracingLogger)))
//!     .with_shard_iterator_trim_horizon();
//!
//! config.validate()?;
//! # Ok::<(), shardline_config::ConfigError>(())
//! ```

use std::{fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};

use crate::{
    error::Result,
    logger::{Logger, default_logger},
    start::{StartPosition, StreamStartMode},
    stats::{StatReceiver, default_stats},
    validation::validate_config,
};

/// Default pause after a poll that returned no records (250ms).
pub const DEFAULT_THROTTLE_DELAY: Duration = Duration::from_millis(250);

/// Default interval between checkpoint writes (1 second).
pub const DEFAULT_COMMIT_FREQUENCY: Duration = Duration::from_millis(1000);

/// Default interval between membership re-checks (1 minute).
pub const DEFAULT_SHARD_CHECK_FREQUENCY: Duration = Duration::from_secs(60);

/// Default interval between coordinator actions (1 minute).
pub const DEFAULT_LEADER_ACTION_FREQUENCY: Duration = Duration::from_secs(60);

/// Default capacity of the merged record queue.
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// Default provisioned read capacity for checkpoint store tables.
pub const DEFAULT_CHECKPOINT_READ_CAPACITY: u64 = 10;

/// Default provisioned write capacity for checkpoint store tables.
pub const DEFAULT_CHECKPOINT_WRITE_CAPACITY: u64 = 10;

/// Default polling interval while checkpoint store tables are created or
/// deleted (3 seconds).
pub const DEFAULT_CHECKPOINT_WAITER_DELAY: Duration = Duration::from_secs(3);

/// Default start mode for shards without a checkpoint.
///
/// No sequence number is configured by default, so on its own this resolves
/// to [`StartPosition::TrimHorizon`].
pub const DEFAULT_START_MODE: StreamStartMode = StreamStartMode::AfterSequenceNumber;

/// Configuration for a single consumer instance.
///
/// Cloning is cheap: the sinks are reference counted and every other field is
/// plain data.
#[derive(Clone)]
pub struct ConsumerConfig {
    pub(crate) stats: Option<Arc<dyn StatReceiver>>,
    pub(crate) logger: Option<Arc<dyn Logger>>,

    // Per shard worker
    pub(crate) throttle_delay: Duration,
    pub(crate) commit_frequency: Duration,
    pub(crate) shard_check_frequency: Duration,

    // Coordinator
    pub(crate) leader_action_frequency: Duration,

    // Whole consumer
    pub(crate) buffer_size: usize,

    // Checkpoint store provisioning
    pub(crate) checkpoint_read_capacity: u64,
    pub(crate) checkpoint_write_capacity: u64,
    pub(crate) checkpoint_waiter_delay: Duration,

    // Start position
    pub(crate) start_mode: StreamStartMode,
    pub(crate) at_timestamp: Option<DateTime<Utc>>,
    pub(crate) sequence_number: Option<String>,
}

impl ConsumerConfig {
    /// Creates a configuration with every option at its default.
    ///
    /// The result passes [`validate`](Self::validate) as is.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stats: Some(default_stats()),
            logger: Some(default_logger()),
            throttle_delay: DEFAULT_THROTTLE_DELAY,
            commit_frequency: DEFAULT_COMMIT_FREQUENCY,
            shard_check_frequency: DEFAULT_SHARD_CHECK_FREQUENCY,
            leader_action_frequency: DEFAULT_LEADER_ACTION_FREQUENCY,
            buffer_size: DEFAULT_BUFFER_SIZE,
            checkpoint_read_capacity: DEFAULT_CHECKPOINT_READ_CAPACITY,
            checkpoint_write_capacity: DEFAULT_CHECKPOINT_WRITE_CAPACITY,
            checkpoint_waiter_delay: DEFAULT_CHECKPOINT_WAITER_DELAY,
            start_mode: DEFAULT_START_MODE,
            at_timestamp: None,
            sequence_number: None,
        }
    }

    /// Checks the configuration against the consumer's safety rules.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule; see [`validate_config`].
    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }

    /// Returns where a shard should start reading.
    ///
    /// `checkpoint` is the shard's stored sequence number, if any. See
    /// [`StartPosition::resolve`] for the fallback rules.
    #[must_use]
    pub fn start_position(&self, checkpoint: Option<&str>) -> StartPosition {
        StartPosition::resolve(
            checkpoint,
            self.start_mode,
            self.sequence_number.as_deref(),
            self.at_timestamp,
        )
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the statistics sink, if one is configured.
    #[must_use]
    pub fn stats(&self) -> Option<&Arc<dyn StatReceiver>> {
        self.stats.as_ref()
    }

    /// Returns the log sink, if one is configured.
    #[must_use]
    pub fn logger(&self) -> Option<&Arc<dyn Logger>> {
        self.logger.as_ref()
    }

    /// Returns the pause taken after a poll that returned no records.
    #[must_use]
    pub fn throttle_delay(&self) -> Duration {
        self.throttle_delay
    }

    /// Returns the interval between checkpoint writes.
    #[must_use]
    pub fn commit_frequency(&self) -> Duration {
        self.commit_frequency
    }

    /// Returns the interval between membership re-checks.
    #[must_use]
    pub fn shard_check_frequency(&self) -> Duration {
        self.shard_check_frequency
    }

    /// Returns the interval between coordinator actions.
    #[must_use]
    pub fn leader_action_frequency(&self) -> Duration {
        self.leader_action_frequency
    }

    /// Returns the capacity of the merged record queue.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the read capacity requested when creating checkpoint tables.
    #[must_use]
    pub fn checkpoint_read_capacity(&self) -> u64 {
        self.checkpoint_read_capacity
    }

    /// Returns the write capacity requested when creating checkpoint tables.
    #[must_use]
    pub fn checkpoint_write_capacity(&self) -> u64 {
        self.checkpoint_write_capacity
    }

    /// Returns the polling interval used while waiting on checkpoint tables.
    #[must_use]
    pub fn checkpoint_waiter_delay(&self) -> Duration {
        self.checkpoint_waiter_delay
    }

    /// Returns the start mode for shards without a checkpoint.
    #[must_use]
    pub fn start_mode(&self) -> StreamStartMode {
        self.start_mode
    }

    /// Returns the configured start instant.
    #[must_use]
    pub fn at_timestamp(&self) -> Option<DateTime<Utc>> {
        self.at_timestamp
    }

    /// Returns the configured start sequence number.
    #[must_use]
    pub fn sequence_number(&self) -> Option<&str> {
        self.sequence_number.as_deref()
    }

    // ------------------------------------------------------------------
    // Modifiers
    // ------------------------------------------------------------------

    /// Returns a copy with a different throttle delay.
    ///
    /// Must be at least [`MIN_THROTTLE_DELAY`](crate::MIN_THROTTLE_DELAY) to validate.
    #[must_use]
    pub fn with_throttle_delay(&self, delay: Duration) -> Self {
        Self { throttle_delay: delay, ..self.clone() }
    }

    /// Returns a copy with a different commit frequency.
    #[must_use]
    pub fn with_commit_frequency(&self, commit_frequency: Duration) -> Self {
        Self { commit_frequency, ..self.clone() }
    }

    /// Returns a copy with a different shard check frequency.
    ///
    /// Must not exceed the leader action frequency.
    #[must_use]
    pub fn with_shard_check_frequency(&self, shard_check_frequency: Duration) -> Self {
        Self { shard_check_frequency, ..self.clone() }
    }

    /// Returns a copy with a different leader action frequency.
    #[must_use]
    pub fn with_leader_action_frequency(&self, leader_action_frequency: Duration) -> Self {
        Self { leader_action_frequency, ..self.clone() }
    }

    /// Returns a copy with a different merged record queue capacity.
    ///
    /// When the queue fills, workers stop fetching, so a slow client falls
    /// behind the stream rather than growing memory.
    #[must_use]
    pub fn with_buffer_size(&self, buffer_size: usize) -> Self {
        Self { buffer_size, ..self.clone() }
    }

    /// Returns a copy with a different statistics sink.
    ///
    /// `None` leaves the configuration without a sink, which fails validation.
    #[must_use]
    pub fn with_stats(&self, stats: Option<Arc<dyn StatReceiver>>) -> Self {
        Self { stats, ..self.clone() }
    }

    /// Returns a copy with a different checkpoint table read capacity.
    ///
    /// Only used when the consumer creates the tables itself.
    #[must_use]
    pub fn with_checkpoint_read_capacity(&self, read_capacity: u64) -> Self {
        Self { checkpoint_read_capacity: read_capacity, ..self.clone() }
    }

    /// Returns a copy with a different checkpoint table write capacity.
    ///
    /// Only used when the consumer creates the tables itself.
    #[must_use]
    pub fn with_checkpoint_write_capacity(&self, write_capacity: u64) -> Self {
        Self { checkpoint_write_capacity: write_capacity, ..self.clone() }
    }

    /// Returns a copy with a different checkpoint table waiter delay.
    #[must_use]
    pub fn with_checkpoint_waiter_delay(&self, delay: Duration) -> Self {
        Self { checkpoint_waiter_delay: delay, ..self.clone() }
    }

    /// Returns a copy with a different log sink.
    ///
    /// `None` leaves the configuration without a sink, which fails validation.
    #[must_use]
    pub fn with_logger(&self, logger: Option<Arc<dyn Logger>>) -> Self {
        Self { logger, ..self.clone() }
    }

    /// Returns a copy that starts new shards at the given instant.
    ///
    /// Any previously configured sequence number is kept but unused.
    #[must_use]
    pub fn with_shard_iterator_at_timestamp(&self, at: DateTime<Utc>) -> Self {
        Self { start_mode: StreamStartMode::AtTimestamp, at_timestamp: Some(at), ..self.clone() }
    }

    /// Returns a copy that starts new shards at the tip of the stream.
    #[must_use]
    pub fn with_shard_iterator_latest(&self) -> Self {
        Self { start_mode: StreamStartMode::Latest, ..self.clone() }
    }

    /// Returns a copy that records `sequence_number` as the start sequence
    /// number.
    ///
    /// The start mode is set to [`StreamStartMode::Latest`], not
    /// [`StreamStartMode::AtSequenceNumber`]. Existing deployments resolve
    /// this setting to the stream tip and rely on it doing so.
    #[must_use]
    pub fn with_shard_iterator_at_sequence_number(
        &self,
        sequence_number: impl Into<String>,
    ) -> Self {
        Self {
            start_mode: StreamStartMode::Latest,
            sequence_number: Some(sequence_number.into()),
            ..self.clone()
        }
    }

    /// Returns a copy that starts new shards right after `sequence_number`.
    ///
    /// Any previously configured instant is kept but unused.
    #[must_use]
    pub fn with_shard_iterator_after_sequence_number(
        &self,
        sequence_number: impl Into<String>,
    ) -> Self {
        Self {
            start_mode: StreamStartMode::AfterSequenceNumber,
            sequence_number: Some(sequence_number.into()),
            ..self.clone()
        }
    }

    /// Returns a copy that starts new shards at the oldest retained record.
    #[must_use]
    pub fn with_shard_iterator_trim_horizon(&self) -> Self {
        Self { start_mode: StreamStartMode::TrimHorizon, ..self.clone() }
    }
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self::new()
    }
}

// Sinks compare by identity: two configurations are equal only if they share
// the same receiver and logger instances.
impl PartialEq for ConsumerConfig {
    fn eq(&self, other: &Self) -> bool {
        fn same<T: ?Sized>(a: Option<&Arc<T>>, b: Option<&Arc<T>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }

        same(self.stats.as_ref(), other.stats.as_ref())
            && same(self.logger.as_ref(), other.logger.as_ref())
            && self.throttle_delay == other.throttle_delay
            && self.commit_frequency == other.commit_frequency
            && self.shard_check_frequency == other.shard_check_frequency
            && self.leader_action_frequency == other.leader_action_frequency
            && self.buffer_size == other.buffer_size
            && self.checkpoint_read_capacity == other.checkpoint_read_capacity
            && self.checkpoint_write_capacity == other.checkpoint_write_capacity
            && self.checkpoint_waiter_delay == other.checkpoint_waiter_delay
            && self.start_mode == other.start_mode
            && self.at_timestamp == other.at_timestamp
            && self.sequence_number == other.sequence_number
    }
}

impl fmt::Debug for ConsumerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerConfig")
            .field("stats", &self.stats)
            .field("logger", &self.logger)
            .field("throttle_delay", &self.throttle_delay)
            .field("commit_frequency", &self.commit_frequency)
            .field("shard_check_frequency", &self.shard_check_frequency)
            .field("leader_action_frequency", &self.leader_action_frequency)
            .field("buffer_size", &self.buffer_size)
            .field("checkpoint_read_capacity", &self.checkpoint_read_capacity)
            .field("checkpoint_write_capacity", &self.checkpoint_write_capacity)
            .field("checkpoint_waiter_delay", &self.checkpoint_waiter_delay)
            .field("start_mode", &self.start_mode)
            .field("at_timestamp", &self.at_timestamp)
            .field("sequence_number", &self.sequence_number)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{logger::TracingLogger, stats::MetricsStatReceiver};

    #[test]
    fn test_defaults() {
        let config = ConsumerConfig::new();
        assert_eq!(config.throttle_delay(), Duration::from_millis(250));
        assert_eq!(config.commit_frequency(), Duration::from_millis(1000));
        assert_eq!(config.shard_check_frequency(), Duration::from_secs(60));
        assert_eq!(config.leader_action_frequency(), Duration::from_secs(60));
        assert_eq!(config.buffer_size(), 100);
        assert_eq!(config.checkpoint_read_capacity(), 10);
        assert_eq!(config.checkpoint_write_capacity(), 10);
        assert_eq!(config.checkpoint_waiter_delay(), Duration::from_secs(3));
        assert_eq!(config.start_mode(), StreamStartMode::AfterSequenceNumber);
        assert_eq!(config.at_timestamp(), None);
        assert_eq!(config.sequence_number(), None);
        assert!(config.stats().is_some());
        assert!(config.logger().is_some());
    }

    #[test]
    fn test_defaults_validate() {
        assert!(ConsumerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_modifier_leaves_receiver_unchanged() {
        let base = ConsumerConfig::new();
        let snapshot = base.clone();

        let changed = base.with_buffer_size(7);

        assert_eq!(base, snapshot);
        assert_eq!(base.buffer_size(), 100);
        assert_eq!(changed.buffer_size(), 7);
    }

    #[test]
    fn test_modifier_changes_only_target() {
        let base = ConsumerConfig::new();
        let changed = base.with_commit_frequency(Duration::from_secs(5));

        assert_eq!(changed.commit_frequency(), Duration::from_secs(5));
        assert_eq!(changed.with_commit_frequency(base.commit_frequency()), base);
    }

    #[test]
    fn test_every_scalar_modifier() {
        let config = ConsumerConfig::new()
            .with_throttle_delay(Duration::from_millis(300))
            .with_commit_frequency(Duration::from_secs(2))
            .with_shard_check_frequency(Duration::from_secs(10))
            .with_leader_action_frequency(Duration::from_secs(20))
            .with_buffer_size(512)
            .with_checkpoint_read_capacity(25)
            .with_checkpoint_write_capacity(50)
            .with_checkpoint_waiter_delay(Duration::from_secs(1));

        assert_eq!(config.throttle_delay(), Duration::from_millis(300));
        assert_eq!(config.commit_frequency(), Duration::from_secs(2));
        assert_eq!(config.shard_check_frequency(), Duration::from_secs(10));
        assert_eq!(config.leader_action_frequency(), Duration::from_secs(20));
        assert_eq!(config.buffer_size(), 512);
        assert_eq!(config.checkpoint_read_capacity(), 25);
        assert_eq!(config.checkpoint_write_capacity(), 50);
        assert_eq!(config.checkpoint_waiter_delay(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sink_modifiers() {
        let stats: Arc<dyn StatReceiver> = Arc::new(MetricsStatReceiver);
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let config = ConsumerConfig::new()
            .with_stats(Some(stats.clone()))
            .with_logger(Some(logger.clone()));

        assert!(Arc::ptr_eq(config.stats().unwrap(), &stats));
        assert!(Arc::ptr_eq(config.logger().unwrap(), &logger));

        let cleared = config.with_stats(None).with_logger(None);
        assert!(cleared.stats().is_none());
        assert!(cleared.logger().is_none());
    }

    #[test]
    fn test_equality_compares_sinks_by_identity() {
        let a = ConsumerConfig::new();
        let b = ConsumerConfig::new();
        // Separate default sinks are distinct instances.
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.with_stats(None).with_logger(None), b.with_stats(None).with_logger(None));
    }

    #[test]
    fn test_at_timestamp_keeps_stale_sequence_number() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let config = ConsumerConfig::new()
            .with_shard_iterator_after_sequence_number("100")
            .with_shard_iterator_at_timestamp(at);

        assert_eq!(config.start_mode(), StreamStartMode::AtTimestamp);
        assert_eq!(config.at_timestamp(), Some(at));
        assert_eq!(config.sequence_number(), Some("100"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sequence_modes_keep_stale_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let config = ConsumerConfig::new()
            .with_shard_iterator_at_timestamp(at)
            .with_shard_iterator_after_sequence_number("200");

        assert_eq!(config.start_mode(), StreamStartMode::AfterSequenceNumber);
        assert_eq!(config.sequence_number(), Some("200"));
        assert_eq!(config.at_timestamp(), Some(at));
    }

    #[test]
    fn test_at_sequence_number_sets_latest_mode() {
        let config = ConsumerConfig::new().with_shard_iterator_at_sequence_number("300");
        assert_eq!(config.start_mode(), StreamStartMode::Latest);
        assert_eq!(config.sequence_number(), Some("300"));
        assert_eq!(config.start_position(None), StartPosition::Latest);
    }

    #[test]
    fn test_mode_only_modifiers_keep_companions() {
        let at = Utc.with_ymd_and_hms(2022, 6, 30, 23, 59, 59).unwrap();
        let config = ConsumerConfig::new()
            .with_shard_iterator_after_sequence_number("400")
            .with_shard_iterator_at_timestamp(at);

        let latest = config.with_shard_iterator_latest();
        assert_eq!(latest.start_mode(), StreamStartMode::Latest);
        assert_eq!(latest.sequence_number(), Some("400"));
        assert_eq!(latest.at_timestamp(), Some(at));

        let horizon = config.with_shard_iterator_trim_horizon();
        assert_eq!(horizon.start_mode(), StreamStartMode::TrimHorizon);
        assert_eq!(horizon.sequence_number(), Some("400"));
        assert_eq!(horizon.at_timestamp(), Some(at));
    }

    #[test]
    fn test_default_start_position_falls_back_to_trim_horizon() {
        let config = ConsumerConfig::new();
        assert_eq!(config.start_position(None), StartPosition::TrimHorizon);
        assert_eq!(
            config.start_position(Some("500")),
            StartPosition::AfterSequenceNumber("500".to_owned())
        );
    }

    #[test]
    fn test_debug_lists_options() {
        let rendered = format!("{:?}", ConsumerConfig::new());
        assert!(rendered.contains("throttle_delay: 250ms"));
        assert!(rendered.contains("NoopStatReceiver"));
        assert!(rendered.contains("NoopLogger"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConsumerConfig>();
    }
}
