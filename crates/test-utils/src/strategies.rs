//! Proptest strategies for shardline configuration values.
//!
//! Strategies produce option values on either side of the validation rules so
//! properties can exercise the boundaries without hand-picked cases.
//!
//! # Usage
//!
//! ```no_run
//! use shardline_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(delay in strategies::arb_sub_floor_throttle_delay()) {
//!         // test invariant with a throttle delay the validator must reject
//!     }
//! }
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use shardline_config::{ConsumerConfig, MIN_THROTTLE_DELAY, StreamStartMode};

/// Generates a throttle delay strictly below [`MIN_THROTTLE_DELAY`], at
/// nanosecond resolution.
pub fn arb_sub_floor_throttle_delay() -> impl Strategy<Value = Duration> {
    let floor = u64::try_from(MIN_THROTTLE_DELAY.as_nanos()).unwrap_or(u64::MAX);
    (0..floor).prop_map(Duration::from_nanos)
}

/// Generates a throttle delay between [`MIN_THROTTLE_DELAY`] and 10 seconds.
pub fn arb_valid_throttle_delay() -> impl Strategy<Value = Duration> {
    let floor = u64::try_from(MIN_THROTTLE_DELAY.as_millis()).unwrap_or(u64::MAX);
    (floor..=10_000u64).prop_map(Duration::from_millis)
}

/// Generates a non-zero duration between 1ms and 1 hour.
pub fn arb_positive_duration() -> impl Strategy<Value = Duration> {
    (1u64..=3_600_000).prop_map(Duration::from_millis)
}

/// Generates a `(shard_check, leader_action)` pair where the shard check is
/// strictly slower than the leader action. Both are non-zero.
pub fn arb_inverted_frequencies() -> impl Strategy<Value = (Duration, Duration)> {
    (1u64..=3_600_000, 1u64..=3_600_000).prop_map(|(leader, extra)| {
        (Duration::from_millis(leader + extra), Duration::from_millis(leader))
    })
}

/// Generates a `(shard_check, leader_action)` pair that satisfies
/// `0 < shard_check <= leader_action`.
pub fn arb_ordered_frequencies() -> impl Strategy<Value = (Duration, Duration)> {
    (1u64..=3_600_000, 0u64..=3_600_000).prop_map(|(shard_check, extra)| {
        (Duration::from_millis(shard_check), Duration::from_millis(shard_check + extra))
    })
}

/// Generates an arbitrary stream start mode.
pub fn arb_start_mode() -> impl Strategy<Value = StreamStartMode> {
    prop::sample::select(StreamStartMode::ALL.to_vec())
}

/// Generates a stream sequence number: 1-56 decimal digits.
pub fn arb_sequence_number() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,55}"
}

/// Generates an instant between 2015-01-01 and 2035-01-01 UTC, at second
/// resolution.
pub fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (1_420_070_400i64..2_051_222_400).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0).single().unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    })
}

/// Generates a configuration that passes validation.
///
/// Timing, capacity and buffer options are randomised within their valid
/// ranges; sinks stay at their defaults.
pub fn arb_valid_config() -> impl Strategy<Value = ConsumerConfig> {
    (
        arb_valid_throttle_delay(),
        arb_positive_duration(),
        arb_ordered_frequencies(),
        1usize..=100_000,
        1u64..=40_000,
        1u64..=40_000,
        0u64..=60_000,
    )
        .prop_map(
            |(throttle, commit, (shard_check, leader_action), buffer, read, write, waiter)| {
                ConsumerConfig::new()
                    .with_throttle_delay(throttle)
                    .with_commit_frequency(commit)
                    .with_shard_check_frequency(shard_check)
                    .with_leader_action_frequency(leader_action)
                    .with_buffer_size(buffer)
                    .with_checkpoint_read_capacity(read)
                    .with_checkpoint_write_capacity(write)
                    .with_checkpoint_waiter_delay(Duration::from_millis(waiter))
            },
        )
}
