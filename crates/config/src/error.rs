//! Configuration error types.
//!
//! Every validation failure maps to exactly one variant. The validator stops
//! at the first failing check, so a returned error names a single problem even
//! when several options are wrong at once.

use snafu::Snafu;

/// Result type alias for configuration operations.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Errors produced while validating a [`ConsumerConfig`](crate::ConsumerConfig).
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// The throttle delay is below [`MIN_THROTTLE_DELAY`](crate::MIN_THROTTLE_DELAY).
    #[snafu(display("config has invalid throttle delay: must be at least 200ms"))]
    InvalidThrottleDelay,

    /// The commit frequency is zero.
    #[snafu(display("config has invalid commit frequency: must be greater than zero"))]
    InvalidCommitFrequency,

    /// The shard check frequency is zero.
    #[snafu(display("config has invalid shard check frequency: must be greater than zero"))]
    InvalidShardCheckFrequency,

    /// The leader action frequency is zero, or shorter than the shard check
    /// frequency.
    ///
    /// Both causes share this variant.
    #[snafu(display(
        "config has invalid leader action frequency: must be greater than zero and not less \
         than the shard check frequency"
    ))]
    InvalidLeaderActionFrequency,

    /// The merged record buffer has zero capacity.
    #[snafu(display("config has invalid buffer size: must be greater than zero"))]
    InvalidBufferSize,

    /// No statistics sink is configured.
    #[snafu(display("config has invalid stats receiver: a receiver is required"))]
    InvalidStats,

    /// The checkpoint store read or write capacity is zero.
    #[snafu(display(
        "config has invalid checkpoint store capacity: read and write capacity must be \
         greater than zero"
    ))]
    InvalidCheckpointCapacity,

    /// No log sink is configured.
    #[snafu(display("config has invalid logger: a logger is required"))]
    InvalidLogger,

    /// A stream start mode name was not recognised.
    #[snafu(display("unknown stream start mode '{name}'"))]
    UnknownStartMode {
        /// The name that failed to parse.
        name: String,
    },
}

impl ConfigError {
    /// Returns the name of the option this error refers to.
    ///
    /// [`ConfigError::InvalidCheckpointCapacity`] covers both capacities and
    /// reports them together.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidThrottleDelay => "throttle_delay",
            Self::InvalidCommitFrequency => "commit_frequency",
            Self::InvalidShardCheckFrequency => "shard_check_frequency",
            Self::InvalidLeaderActionFrequency => "leader_action_frequency",
            Self::InvalidBufferSize => "buffer_size",
            Self::InvalidStats => "stats",
            Self::InvalidCheckpointCapacity => "checkpoint_capacity",
            Self::InvalidLogger => "logger",
            Self::UnknownStartMode { .. } => "start_mode",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_option() {
        assert!(ConfigError::InvalidThrottleDelay.to_string().contains("throttle delay"));
        assert!(ConfigError::InvalidBufferSize.to_string().contains("buffer size"));
        assert!(ConfigError::InvalidLogger.to_string().contains("logger"));
    }

    #[test]
    fn test_throttle_delay_message_mentions_floor() {
        assert!(ConfigError::InvalidThrottleDelay.to_string().contains("200ms"));
    }

    #[test]
    fn test_unknown_start_mode_display() {
        let err = ConfigError::UnknownStartMode { name: "SOMEWHERE".to_owned() };
        assert_eq!(err.to_string(), "unknown stream start mode 'SOMEWHERE'");
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(ConfigError::InvalidCommitFrequency.field(), "commit_frequency");
        assert_eq!(ConfigError::InvalidShardCheckFrequency.field(), "shard_check_frequency");
        assert_eq!(ConfigError::InvalidLeaderActionFrequency.field(), "leader_action_frequency");
        assert_eq!(ConfigError::InvalidStats.field(), "stats");
        assert_eq!(ConfigError::InvalidCheckpointCapacity.field(), "checkpoint_capacity");
        assert_eq!(
            ConfigError::UnknownStartMode { name: String::new() }.field(),
            "start_mode"
        );
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + std::error::Error + 'static>() {}
        assert_send_sync::<ConfigError>();
    }
}
