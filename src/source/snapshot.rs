//! Shared sample type produced by counter sources.

use std::time::Instant;

/// One reading of a device's cumulative counter pair.
///
/// Counters count bytes since device or system start and are carried as
/// `f64` so very large 32/64-bit OS counters fit without wraparound
/// arithmetic. They can still appear to decrease (device reset, driver
/// reload, counter rollover); the rate estimator treats a decrease as a
/// reset-to-current-value event, never as a negative rate.
#[derive(Debug, Clone, Copy)]
pub struct CounterSnapshot {
    /// When the counters were read.
    pub timestamp: Instant,
    /// Cumulative inbound bytes (network RX, disk sectors read x 512).
    pub counter_in: f64,
    /// Cumulative outbound bytes (network TX, disk sectors written x 512).
    pub counter_out: f64,
}

impl CounterSnapshot {
    pub fn new(timestamp: Instant, counter_in: f64, counter_out: f64) -> Self {
        Self {
            timestamp,
            counter_in,
            counter_out,
        }
    }
}
