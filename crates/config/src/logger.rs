//! Pluggable diagnostic log sink.
//!
//! Consumer components write human-readable diagnostics through [`Logger`].
//! [`NoopLogger`] is the default; [`TracingLogger`] forwards to `tracing` so
//! messages end up wherever the process subscriber sends them.

use std::{fmt, sync::Arc};

/// Receives diagnostic messages from the consumer.
pub trait Logger: Send + Sync + fmt::Debug {
    /// Writes a single formatted message.
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Log sink that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _args: fmt::Arguments<'_>) {}
}

/// Log sink that emits each message as a `tracing` event.
///
/// Events are recorded at `INFO` under the `shardline` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "shardline", "{}", args);
    }
}

/// Creates the default log sink (no-op).
pub(crate) fn default_logger() -> Arc<dyn Logger> {
    Arc::new(NoopLogger)
}
