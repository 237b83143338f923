//! Counter source abstraction for reading cumulative device counters.
//!
//! This module provides a trait-based abstraction over the per-device
//! counter files the OS exposes, with implementations for network
//! interfaces, block devices, and a synthetic scripted source for tests.

mod disk;
mod net;
mod scripted;
mod snapshot;

pub use disk::DiskSource;
pub use net::NetSource;
pub use scripted::ScriptedSource;
pub use snapshot::CounterSnapshot;

use std::fmt::Debug;

use thiserror::Error;

/// Errors that can occur when sampling a counter source.
///
/// Absence and down-state are expected steady states, not failures: the
/// monitor loop reports them as unavailability and keeps ticking. A read
/// error on an otherwise available device is a transient glitch.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The device's counter files do not exist.
    #[error("device not present")]
    Absent,

    /// The device exists but its link is down.
    #[error("device is down")]
    Down,

    /// The counter files exist but a sample could not be read or parsed.
    #[error("failed to read counters: {0}")]
    Read(String),
}

/// Trait for reading the cumulative (in, out) byte counters of a named
/// device.
///
/// Implementations read from different OS paths and apply different unit
/// conversions, but all present the same pair of monotonically increasing
/// byte counters. Reads are short, synchronous, and mutate no OS state.
///
/// # Example
///
/// ```
/// use ratewatch::source::{CounterSource, NetSource};
///
/// let mut source = NetSource::new("eth0");
/// if source.is_available() {
///     let snapshot = source.read().unwrap();
///     println!("rx so far: {} bytes", snapshot.counter_in);
/// }
/// ```
pub trait CounterSource: Send + Debug {
    /// Whether the device is currently present and up.
    ///
    /// Checked once per tick; a `false` here is a steady state, not an
    /// error, and the monitor publishes zero rates until it clears.
    fn is_available(&self) -> bool;

    /// Read the current cumulative counter pair.
    fn read(&mut self) -> Result<CounterSnapshot, SourceError>;

    /// The configured device name.
    fn device(&self) -> &str;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the status bar.
    fn description(&self) -> &str;
}
