//! Configuration for the shardline stream consumer.
//!
//! A shardline consumer runs one worker per shard of an append-only stream,
//! periodically writes read progress to a shared checkpoint store, and elects
//! one worker as coordinator for fleet-wide housekeeping. This crate holds the
//! settings those components share and the rules that keep them consistent.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! use shardline_config::{ConfigError, ConsumerConfig};
//!
//! let config = ConsumerConfig::new().with_commit_frequency(Duration::from_secs(5));
//! assert!(config.validate().is_ok());
//!
//! let too_fast = config.with_throttle_delay(Duration::from_millis(100));
//! assert_eq!(too_fast.validate(), Err(ConfigError::InvalidThrottleDelay));
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! ConsumerConfig::new() ──▶ .with_*() ... .with_*() ──▶ .validate() ──▶ consumer
//!        defaults           new value per call          first failure     read-only
//! ```
//!
//! Values are immutable and `Send + Sync`; a validated configuration can be
//! shared across workers without locking.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod logger;
mod start;
mod stats;
mod validation;

pub use config::{
    ConsumerConfig, DEFAULT_BUFFER_SIZE, DEFAULT_CHECKPOINT_READ_CAPACITY,
    DEFAULT_CHECKPOINT_WAITER_DELAY, DEFAULT_CHECKPOINT_WRITE_CAPACITY, DEFAULT_COMMIT_FREQUENCY,
    DEFAULT_LEADER_ACTION_FREQUENCY, DEFAULT_SHARD_CHECK_FREQUENCY, DEFAULT_START_MODE,
    DEFAULT_THROTTLE_DELAY,
};
pub use error::{ConfigError, Result};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use start::{StartPosition, StreamStartMode};
pub use stats::{MetricsStatReceiver, NoopStatReceiver, StatReceiver};
pub use validation::{MIN_THROTTLE_DELAY, validate_config};
