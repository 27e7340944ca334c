//! Where a shard worker starts reading when it has no checkpoint.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, UnknownStartModeSnafu};

/// Policy for the initial read position of a shard without a checkpoint.
///
/// Serialises to the log service's iterator type names (`TRIM_HORIZON`,
/// `LATEST`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamStartMode {
    /// The oldest record still retained by the stream.
    TrimHorizon,
    /// Only records appended after the worker starts.
    Latest,
    /// The record carrying a given sequence number.
    AtSequenceNumber,
    /// The record immediately after a given sequence number.
    AfterSequenceNumber,
    /// The first record at or after a given instant.
    AtTimestamp,
}

impl StreamStartMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::TrimHorizon,
        Self::Latest,
        Self::AtSequenceNumber,
        Self::AfterSequenceNumber,
        Self::AtTimestamp,
    ];

    /// Returns the log service's name for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrimHorizon => "TRIM_HORIZON",
            Self::Latest => "LATEST",
            Self::AtSequenceNumber => "AT_SEQUENCE_NUMBER",
            Self::AfterSequenceNumber => "AFTER_SEQUENCE_NUMBER",
            Self::AtTimestamp => "AT_TIMESTAMP",
        }
    }

    /// Returns true if the mode reads relative to a sequence number.
    #[must_use]
    pub const fn requires_sequence_number(self) -> bool {
        matches!(self, Self::AtSequenceNumber | Self::AfterSequenceNumber)
    }

    /// Returns true if the mode reads relative to an instant.
    #[must_use]
    pub const fn requires_timestamp(self) -> bool {
        matches!(self, Self::AtTimestamp)
    }
}

impl fmt::Display for StreamStartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamStartMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownStartModeSnafu { name: s }.build())
    }
}

/// Concrete position a shard worker asks the stream for.
///
/// Produced by [`ConsumerConfig::start_position`](crate::ConsumerConfig::start_position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPosition {
    /// Oldest retained record.
    TrimHorizon,
    /// Newest records only.
    Latest,
    /// At the given sequence number.
    AtSequenceNumber(String),
    /// Immediately after the given sequence number.
    AfterSequenceNumber(String),
    /// At or after the given instant.
    AtTimestamp(DateTime<Utc>),
}

impl StartPosition {
    /// Returns the iterator mode this position is requested with.
    #[must_use]
    pub fn mode(&self) -> StreamStartMode {
        match self {
            Self::TrimHorizon => StreamStartMode::TrimHorizon,
            Self::Latest => StreamStartMode::Latest,
            Self::AtSequenceNumber(_) => StreamStartMode::AtSequenceNumber,
            Self::AfterSequenceNumber(_) => StreamStartMode::AfterSequenceNumber,
            Self::AtTimestamp(_) => StreamStartMode::AtTimestamp,
        }
    }

    /// Resolves a position from a stored checkpoint and the configured start
    /// policy.
    ///
    /// A non-empty checkpoint always resumes right after itself. Without one,
    /// the configured mode is used; a sequence or timestamp mode whose
    /// companion value is missing falls back to [`StartPosition::TrimHorizon`].
    #[must_use]
    pub fn resolve(
        checkpoint: Option<&str>,
        mode: StreamStartMode,
        sequence_number: Option<&str>,
        at_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        if let Some(checkpoint) = checkpoint.filter(|c| !c.is_empty()) {
            return Self::AfterSequenceNumber(checkpoint.to_owned());
        }

        let sequence_number = sequence_number.filter(|s| !s.is_empty()).map(str::to_owned);
        match (mode, sequence_number, at_timestamp) {
            (StreamStartMode::TrimHorizon, _, _) => Self::TrimHorizon,
            (StreamStartMode::Latest, _, _) => Self::Latest,
            (StreamStartMode::AtSequenceNumber, Some(seq), _) => Self::AtSequenceNumber(seq),
            (StreamStartMode::AfterSequenceNumber, Some(seq), _) => Self::AfterSequenceNumber(seq),
            (StreamStartMode::AtTimestamp, _, Some(at)) => Self::AtTimestamp(at),
            _ => Self::TrimHorizon,
        }
    }
}
