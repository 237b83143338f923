//! Network interface counter source.
//!
//! Reads the cumulative RX/TX byte counters from the per-interface
//! statistics files under `/sys/class/net`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use super::{CounterSnapshot, CounterSource, SourceError};

/// Default sysfs root for network interfaces.
const SYS_CLASS_NET: &str = "/sys/class/net";

/// A counter source backed by a network interface.
///
/// Availability follows the interface's operational state: the device
/// counts as up only while its `operstate` file reads exactly `"up"`.
/// Counters are plain byte totals, no unit conversion needed.
#[derive(Debug)]
pub struct NetSource {
    device: String,
    description: String,
    rx_path: PathBuf,
    tx_path: PathBuf,
    operstate_path: PathBuf,
}

impl NetSource {
    /// Create a source for the given interface under `/sys/class/net`.
    pub fn new(device: &str) -> Self {
        Self::with_root(device, SYS_CLASS_NET)
    }

    /// Create a source rooted at a different directory tree.
    ///
    /// Tests point this at a fabricated sysfs layout in a tempdir.
    pub fn with_root<P: AsRef<Path>>(device: &str, root: P) -> Self {
        let dir = root.as_ref().join(device);
        let description = format!("net: {}", dir.display());
        debug!(device, "opening network counter source");
        Self {
            device: device.to_string(),
            description,
            rx_path: dir.join("statistics/rx_bytes"),
            tx_path: dir.join("statistics/tx_bytes"),
            operstate_path: dir.join("operstate"),
        }
    }

    /// Read a single-value counter file.
    fn read_counter(path: &Path) -> Result<f64, SourceError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SourceError::Read(format!("{}: {}", path.display(), e)))?;
        content
            .trim()
            .parse::<f64>()
            .map_err(|e| SourceError::Read(format!("{}: {}", path.display(), e)))
    }
}

impl CounterSource for NetSource {
    /// An interface is available when its operstate file reads the literal
    /// `"up"`. Any other content, including a missing file, counts as down.
    fn is_available(&self) -> bool {
        match fs::read_to_string(&self.operstate_path) {
            Ok(content) => content.trim() == "up",
            Err(_) => false,
        }
    }

    /// A failure on either per-direction file is a hard read error for the
    /// whole sample; partial pairs are never returned.
    fn read(&mut self) -> Result<CounterSnapshot, SourceError> {
        let rx = Self::read_counter(&self.rx_path)?;
        let tx = Self::read_counter(&self.tx_path)?;
        Ok(CounterSnapshot::new(Instant::now(), rx, tx))
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn description(&self) -> &str {
        &self.description
    }
}
