//! # ratewatch
//!
//! A live throughput monitor for network interfaces and block devices.
//!
//! ratewatch samples the cumulative byte counters the kernel exposes under
//! sysfs at a fixed interval, converts the deltas into smoothed
//! bytes/second rates, and tracks an adaptive display ceiling that maps
//! each rate onto a bounded [0,1] bar. The terminal UI around it is a thin
//! collaborator: it calls [`Monitor::tick`] on a timer and renders whatever
//! [`Monitor::poll`] publishes.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐   ┌──────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │──▶│ Terminal │ │
//! │  │ (state) │    │ (engine) │    │(render) │   │          │ │
//! │  └────┬────┘    └──────────┘    └─────────┘   └──────────┘ │
//! │       │                                                    │
//! │       ▼                                                    │
//! │  ┌─────────┐                                               │
//! │  │ source  │◀── NetSource | DiskSource | ScriptedSource    │
//! │  │ (input) │                                               │
//! │  └─────────┘                                               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the [`CounterSource`] trait and its sysfs-backed
//!   implementations, plus a scripted source for tests
//! - **[`data`]**: the engine: rate estimation, the smoothing window, the
//!   adaptive scale, and the orchestrating [`Monitor`]
//! - **[`settings`]**: the persisted JSON settings the CLI layer owns
//! - **[`app`]**, **[`events`]**, **[`ui`]**: the terminal collaborator
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a network interface
//! ratewatch eth0
//!
//! # Watch a disk, sampling once a second
//! ratewatch sda --disk --interval 1000
//!
//! # Ten JSON readings on stdout, no TUI
//! ratewatch eth0 --oneshot 10
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use ratewatch::{DeviceKind, Monitor, MonitorConfig};
//!
//! let config = MonitorConfig::new("eth0", DeviceKind::Net);
//! let mut monitor = Monitor::configure(config).unwrap();
//!
//! let reading = monitor.tick();
//! println!("in: {} B/s out: {} B/s", reading.rate_in, reading.rate_out);
//! ```
//!
//! ### With a synthetic source
//!
//! ```
//! use std::time::Instant;
//! use ratewatch::source::{CounterSnapshot, ScriptedSource};
//! use ratewatch::{DeviceKind, Monitor, MonitorConfig};
//!
//! let mut source = ScriptedSource::new("demo0");
//! source.push(CounterSnapshot::new(Instant::now(), 1000.0, 0.0));
//!
//! let config = MonitorConfig::new("demo0", DeviceKind::Net);
//! let monitor = Monitor::with_source(config, Box::new(source)).unwrap();
//! assert_eq!(monitor.device_label(), "demo0");
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{DeviceKind, Monitor, MonitorConfig, Phase, RateSample, Reading};
pub use settings::Settings;
pub use source::{CounterSnapshot, CounterSource, DiskSource, NetSource, ScriptedSource, SourceError};
