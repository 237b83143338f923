//! Synthetic counter source for tests and demos.
//!
//! Pops prepared snapshots from a queue instead of touching the
//! filesystem. This is what makes the monitor pipeline testable with
//! exact timestamps and injected failures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{CounterSnapshot, CounterSource, SourceError};

/// A counter source fed from a queue of prepared readings.
///
/// Availability is a shared flag: [`ScriptedSource::availability_handle`]
/// returns a handle that keeps working after the source is boxed into a
/// monitor, so tests can flap the device on and off between ticks.
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use ratewatch::source::{CounterSnapshot, CounterSource, ScriptedSource};
///
/// let mut source = ScriptedSource::new("test0");
/// source.push(CounterSnapshot::new(Instant::now(), 1000.0, 500.0));
/// assert!(source.is_available());
/// assert_eq!(source.read().unwrap().counter_in, 1000.0);
/// ```
#[derive(Debug)]
pub struct ScriptedSource {
    device: String,
    description: String,
    available: Arc<AtomicBool>,
    queue: VecDeque<Result<CounterSnapshot, SourceError>>,
}

impl ScriptedSource {
    /// Create an empty scripted source, available by default.
    pub fn new(device: &str) -> Self {
        Self {
            device: device.to_string(),
            description: format!("scripted: {}", device),
            available: Arc::new(AtomicBool::new(true)),
            queue: VecDeque::new(),
        }
    }

    /// Flip the availability flag the next `is_available` call reports.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Shared handle to the availability flag.
    pub fn availability_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.available)
    }

    /// Queue a snapshot for a future `read` call.
    pub fn push(&mut self, snapshot: CounterSnapshot) {
        self.queue.push_back(Ok(snapshot));
    }

    /// Queue a read failure for a future `read` call.
    pub fn push_error(&mut self, error: SourceError) {
        self.queue.push_back(Err(error));
    }

    /// Number of queued readings not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl CounterSource for ScriptedSource {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    /// An exhausted script reads as a transient failure, matching what a
    /// real device does when its files stop cooperating mid-run.
    fn read(&mut self) -> Result<CounterSnapshot, SourceError> {
        self.queue
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Read("script exhausted".to_string())))
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn description(&self) -> &str {
        &self.description
    }
}
