//! Monitor orchestration: one configured device, one timer-driven loop.
//!
//! A [`Monitor`] owns a counter source and the whole smoothing/scaling
//! pipeline for it. The collaborator's event loop calls [`Monitor::tick`]
//! on a fixed cadence and renders whatever [`Monitor::poll`] publishes;
//! reconfiguration builds a fresh instance rather than mutating this one,
//! so stale backup counters are never compared against a new device.

use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::history::SmoothingWindow;
use super::rate::RateEstimator;
use super::scale::{AdaptiveScale, INIT_MAX};
use crate::source::{CounterSource, DiskSource, NetSource};

/// Longest accepted device name.
pub const DEVICE_NAME_MAX: usize = 32;

/// Default sampling period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

/// Which kind of counter source a device name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// A network interface under `/sys/class/net`.
    Net,
    /// A block device under `/sys/block`.
    Disk,
}

/// Validated monitor configuration.
///
/// Fixed maxima are in bytes/second; the settings layer converts from the
/// KiB/s values it persists before building one of these.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub device: String,
    pub kind: DeviceKind,
    pub interval: Duration,
    /// Fixed ceiling for the inbound channel; `None` falls back to
    /// [`INIT_MAX`] when auto-max is off.
    pub fixed_max_in: Option<u64>,
    /// Fixed ceiling for the outbound channel.
    pub fixed_max_out: Option<u64>,
    pub auto_max: bool,
}

impl MonitorConfig {
    /// Configuration with the stock defaults: 250 ms interval, automatic
    /// maximum.
    pub fn new(device: &str, kind: DeviceKind) -> Self {
        Self {
            device: device.to_string(),
            kind,
            interval: DEFAULT_INTERVAL,
            fixed_max_in: None,
            fixed_max_out: None,
            auto_max: true,
        }
    }

    /// Reject configurations that would leave the loop unable to run.
    pub fn validate(&self) -> Result<()> {
        if self.device.is_empty() {
            bail!("no device configured");
        }
        if self.device.len() > DEVICE_NAME_MAX {
            bail!("device name longer than {} characters", DEVICE_NAME_MAX);
        }
        if self.interval.is_zero() {
            bail!("update interval must be positive");
        }
        if self.fixed_max_in == Some(0) || self.fixed_max_out == Some(0) {
            bail!("fixed maximum must be positive");
        }
        Ok(())
    }

    fn scale_for(&self, fixed_max: Option<u64>) -> AdaptiveScale {
        if self.auto_max {
            AdaptiveScale::auto()
        } else {
            AdaptiveScale::fixed(fixed_max.unwrap_or(INIT_MAX))
        }
    }
}

/// One published engine output, refreshed every tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Reading {
    /// Whether the device was present and up at the last tick.
    pub available: bool,
    /// Smoothed inbound rate, bytes/second.
    pub rate_in: u64,
    /// Smoothed outbound rate, bytes/second.
    pub rate_out: u64,
    /// Sum of the two smoothed rates, not derived from a third counter.
    pub rate_total: u64,
    /// Inbound rate normalized against its ceiling, in [0, 1].
    pub fraction_in: f64,
    /// Outbound rate normalized against its ceiling, in [0, 1].
    pub fraction_out: f64,
}

/// Sampling lifecycle for a configured device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Device name accepted; availability unknown until the first tick.
    Probing,
    /// Device present and up; sampling proceeds.
    Available,
    /// Device absent or down; rates report zero until it returns.
    Unavailable,
}

/// Owns one counter source and the full rate pipeline built around it.
///
/// Created per configured device and replaced wholesale on
/// reconfiguration: histories and ceilings always restart from their
/// initial state, and the caller represents "unconfigured" by simply not
/// holding a `Monitor`.
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    source: Box<dyn CounterSource>,
    estimator: RateEstimator,
    window_in: SmoothingWindow,
    window_out: SmoothingWindow,
    scale_in: AdaptiveScale,
    scale_out: AdaptiveScale,
    phase: Phase,
    reading: Reading,
}

impl Monitor {
    /// Open the configured device and build a fresh pipeline around it.
    pub fn configure(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        let source: Box<dyn CounterSource> = match config.kind {
            DeviceKind::Net => Box::new(NetSource::new(&config.device)),
            DeviceKind::Disk => Box::new(DiskSource::new(&config.device)),
        };
        Self::with_source(config, source)
    }

    /// Build a monitor around an already-opened source.
    ///
    /// Tests and the scripted source attach here; `configure` is a thin
    /// wrapper that picks the sysfs-backed source for the device kind.
    pub fn with_source(config: MonitorConfig, source: Box<dyn CounterSource>) -> Result<Self> {
        config.validate()?;

        let scale_in = config.scale_for(config.fixed_max_in);
        let scale_out = config.scale_for(config.fixed_max_out);

        let mut monitor = Self {
            source,
            estimator: RateEstimator::new(),
            window_in: SmoothingWindow::new(),
            window_out: SmoothingWindow::new(),
            scale_in,
            scale_out,
            phase: Phase::Probing,
            reading: Reading::default(),
            config,
        };

        // Seed from the live counters so the first computed rate is a real
        // delta rather than the since-boot total.
        if monitor.source.is_available() {
            match monitor.source.read() {
                Ok(snapshot) => monitor.estimator.seed(snapshot),
                Err(err) => {
                    warn!(device = monitor.source.device(), error = %err, "seed read failed")
                }
            }
        }

        debug!(device = monitor.source.device(), "monitor configured");
        Ok(monitor)
    }

    /// The configured device name, for display.
    pub fn device_label(&self) -> &str {
        self.source.device()
    }

    /// Description of the underlying source, for the status bar.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latest published reading. Never advances the pipeline, so it can be
    /// called on demand between ticks.
    pub fn poll(&self) -> &Reading {
        &self.reading
    }

    /// Run one sampling cycle: availability check, counter read, rate
    /// estimation, smoothing, scaling, publish.
    ///
    /// Ticks are discrete, non-overlapping units of work; the caller's
    /// single-threaded timer loop guarantees no two run concurrently.
    pub fn tick(&mut self) -> &Reading {
        if !self.source.is_available() {
            if self.phase == Phase::Available {
                debug!(device = self.source.device(), "device went away");
            }
            self.phase = Phase::Unavailable;
            // History and ceilings stay untouched: devices flap, and a
            // brief outage should not forget a recent burst.
            self.reading = Reading {
                available: false,
                ..Reading::default()
            };
            return &self.reading;
        }

        if self.phase != Phase::Available {
            debug!(device = self.source.device(), "device available");
            self.phase = Phase::Available;
        }

        match self.source.read() {
            Ok(snapshot) => match self.estimator.update(snapshot) {
                Some(sample) => {
                    self.window_in.push(sample.rate_in);
                    self.window_out.push(sample.rate_out);

                    let display_in = self.window_in.display_value();
                    let display_out = self.window_out.display_value();
                    let fraction_in = self.scale_in.update(display_in, self.window_in.history_max());
                    let fraction_out =
                        self.scale_out.update(display_out, self.window_out.history_max());

                    self.reading = Reading {
                        available: true,
                        rate_in: display_in,
                        rate_out: display_out,
                        rate_total: display_in + display_out,
                        fraction_in,
                        fraction_out,
                    };
                }
                // Seed tick or non-positive elapsed time: the published
                // values stand as they are.
                None => self.reading.available = true,
            },
            Err(err) => {
                // Transient glitch: keep showing the previous values; the
                // estimator was not advanced, so the next good read is
                // rated against the last good snapshot.
                warn!(device = self.source.device(), error = %err, "sample read failed");
            }
        }

        &self.reading
    }
}
