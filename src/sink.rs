//! Debug sinks for traversal checkpoints
//!
//! A builder reports each checkpoint (entering a directory, skipping a special
//! file, hashing a file, failures) to the sink it was constructed with. Sinks
//! only observe; the snapshot produced is the same with or without one.

use std::fmt;
use std::sync::Mutex;

/// Receiver of formatted checkpoint messages
pub trait DebugSink: Send + Sync {
    fn debug(&self, message: fmt::Arguments<'_>);
}

/// Sink that discards every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn debug(&self, _message: fmt::Arguments<'_>) {}
}

/// Sink that forwards messages to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn debug(&self, message: fmt::Arguments<'_>) {
        tracing::debug!(target: "dirdelta::walk", "{}", message);
    }
}

/// Sink that keeps every message in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DebugSink for MemorySink {
    fn debug(&self, message: fmt::Arguments<'_>) {
        let mut guard = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(message.to_string());
    }
}

impl<F> DebugSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn debug(&self, message: fmt::Arguments<'_>) {
        self(&message.to_string());
    }
}
