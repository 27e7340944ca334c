//! Shared test utilities for shardline crates.
//!
//! - [`test_consumer_config`] - Valid configuration with short intervals
//! - [`recording_config`] - The same, with [`RecordingStatReceiver`] and [`RecordingLogger`] attached
//! - [`strategies`] - Proptest generators for option values

#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::disallowed_methods))]

mod config;
pub use config::{RecordingSinks, recording_config, test_consumer_config};

mod sinks;
pub use sinks::{RecordingLogger, RecordingStatReceiver};

pub mod strategies;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use chrono::Utc;
    use shardline_config::{Logger, StatReceiver};

    use super::*;

    // ============================================
    // Config helper tests
    // ============================================

    #[test]
    fn test_consumer_config_is_valid() {
        let config = test_consumer_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.throttle_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_recording_config_attaches_sinks() {
        let (config, sinks) = recording_config();
        assert!(config.validate().is_ok());

        let stats = config.stats().unwrap();
        stats.checkpoint();
        stats.events_from_stream(4, "shardId-000000000000", Duration::ZERO);
        assert_eq!(sinks.stats.checkpoints(), 1);
        assert_eq!(sinks.stats.events_from_stream(), 4);

        config.logger().unwrap().log(format_args!("shard {} done", 0));
        assert_eq!(sinks.logger.lines(), vec!["shard 0 done"]);
    }

    // ============================================
    // Recording sink tests
    // ============================================

    #[test]
    fn test_recording_stat_receiver_counts() {
        let stats = Arc::new(RecordingStatReceiver::default());
        let now = Utc::now();
        stats.event_to_client(now, now);
        stats.event_to_client(now, now);
        assert_eq!(stats.events_to_client(), 2);
        assert_eq!(stats.checkpoints(), 0);
    }

    #[test]
    fn test_recording_logger_keeps_order() {
        let logger = RecordingLogger::default();
        logger.log(format_args!("first"));
        logger.log(format_args!("second"));
        assert_eq!(logger.lines(), vec!["first", "second"]);
    }
}
