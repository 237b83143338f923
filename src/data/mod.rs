//! Rate estimation, smoothing, and scaling for counter samples.
//!
//! This layer turns raw cumulative counters into the numbers the display
//! actually shows.
//!
//! ## Submodules
//!
//! - [`rate`]: delta-to-rate conversion with reset and clock-anomaly handling
//! - [`history`]: fixed-depth smoothing window per channel
//! - [`scale`]: adaptive display ceiling and [0,1] fraction
//! - [`monitor`]: the orchestrating [`Monitor`] loop and its [`Reading`]
//! - [`units`]: human-readable bytes/second formatting
//!
//! ## Data flow
//!
//! ```text
//! CounterSnapshot (from a source)
//!        |
//!        v
//! RateEstimator::update()  -- RateSample (instantaneous)
//!        |
//!        v
//! SmoothingWindow::push()  -- display_value() / history_max()
//!        |
//!        v
//! AdaptiveScale::update()  -- fraction in [0,1]
//!        |
//!        v
//! Monitor publishes a Reading
//! ```

pub mod history;
pub mod monitor;
pub mod rate;
pub mod scale;
pub mod units;

pub use history::{SmoothingWindow, CALC_DEPTH, STORE_DEPTH};
pub use monitor::{
    DeviceKind, Monitor, MonitorConfig, Phase, Reading, DEFAULT_INTERVAL, DEVICE_NAME_MAX,
};
pub use rate::{RateEstimator, RateSample};
pub use scale::{AdaptiveScale, INIT_MAX, MINIMAL_MAX, SHRINK_MAX};
