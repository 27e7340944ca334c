//! Statistics and log sinks that remember what they received.

use std::{
    fmt,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use shardline_config::{Logger, StatReceiver};

/// Statistics receiver that counts every call.
#[derive(Debug, Default)]
pub struct RecordingStatReceiver {
    checkpoints: AtomicU64,
    events_to_client: AtomicU64,
    events_from_stream: AtomicU64,
}

impl RecordingStatReceiver {
    /// Number of checkpoint writes reported.
    #[must_use]
    pub fn checkpoints(&self) -> u64 {
        self.checkpoints.load(Ordering::Relaxed)
    }

    /// Number of records reported as delivered to the client.
    #[must_use]
    pub fn events_to_client(&self) -> u64 {
        self.events_to_client.load(Ordering::Relaxed)
    }

    /// Total records reported as fetched from the stream.
    #[must_use]
    pub fn events_from_stream(&self) -> u64 {
        self.events_from_stream.load(Ordering::Relaxed)
    }
}

impl StatReceiver for RecordingStatReceiver {
    fn checkpoint(&self) {
        self.checkpoints.fetch_add(1, Ordering::Relaxed);
    }

    fn event_to_client(&self, _inserted: DateTime<Utc>, _retrieved: DateTime<Utc>) {
        self.events_to_client.fetch_add(1, Ordering::Relaxed);
    }

    fn events_from_stream(&self, count: usize, _shard_id: &str, _lag: Duration) {
        self.events_from_stream.fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Logger that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    /// Returns a copy of every message logged so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).push(args.to_string());
    }
}
