//! Safety checks run on a configuration before it reaches the consumer.
//!
//! Checks run in a fixed order and stop at the first failure.

use std::time::Duration;

use snafu::ensure;

use crate::{
    config::ConsumerConfig,
    error::{
        InvalidBufferSizeSnafu, InvalidCheckpointCapacitySnafu, InvalidCommitFrequencySnafu,
        InvalidLeaderActionFrequencySnafu, InvalidLoggerSnafu, InvalidShardCheckFrequencySnafu,
        InvalidStatsSnafu, InvalidThrottleDelaySnafu, Result,
    },
};

/// Smallest accepted throttle delay.
///
/// Shorter delays poll empty shards often enough to trip the stream's
/// per-shard read limits.
pub const MIN_THROTTLE_DELAY: Duration = Duration::from_millis(200);

/// Verifies that a configuration is safe to hand to the consumer.
///
/// Start position options and the checkpoint waiter delay are not checked.
///
/// # Errors
///
/// Returns the [`ConfigError`](crate::ConfigError) for the first violated rule, in this order:
/// 1. `throttle_delay` below [`MIN_THROTTLE_DELAY`]
/// 2. `commit_frequency` is zero
/// 3. `shard_check_frequency` is zero
/// 4. `leader_action_frequency` is zero
/// 5. `shard_check_frequency` exceeds `leader_action_frequency` (reported as the same variant as 4)
/// 6. `buffer_size` is zero
/// 7. no stats receiver
/// 8. checkpoint read or write capacity is zero
/// 9. no logger
pub fn validate_config(config: &ConsumerConfig) -> Result<()> {
    ensure!(config.throttle_delay >= MIN_THROTTLE_DELAY, InvalidThrottleDelaySnafu);
    ensure!(!config.commit_frequency.is_zero(), InvalidCommitFrequencySnafu);
    ensure!(!config.shard_check_frequency.is_zero(), InvalidShardCheckFrequencySnafu);
    ensure!(!config.leader_action_frequency.is_zero(), InvalidLeaderActionFrequencySnafu);
    ensure!(
        config.shard_check_frequency <= config.leader_action_frequency,
        InvalidLeaderActionFrequencySnafu
    );
    ensure!(config.buffer_size != 0, InvalidBufferSizeSnafu);
    ensure!(config.stats.is_some(), InvalidStatsSnafu);
    ensure!(
        config.checkpoint_read_capacity != 0 && config.checkpoint_write_capacity != 0,
        InvalidCheckpointCapacitySnafu
    );
    ensure!(config.logger.is_some(), InvalidLoggerSnafu);
    Ok(())
}
