//! Block device counter source.
//!
//! Parses the cumulative sector counters out of `/sys/block/<dev>/stat`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use super::{CounterSnapshot, CounterSource, SourceError};

/// Default sysfs root for block devices.
const SYS_BLOCK: &str = "/sys/block";

/// Sector counters are always in units of 512 bytes, independent of the
/// device's logical block size.
const SECTOR_SIZE: f64 = 512.0;

/// 0-based positions of the sectors-read and sectors-written fields in the
/// whitespace-separated stat line.
const READ_SECTORS_FIELD: usize = 2;
const WRITE_SECTORS_FIELD: usize = 6;

/// A counter source backed by a block device's `stat` file.
///
/// Availability is simply the existence of that file; a disk has no
/// up/down state to consult.
#[derive(Debug)]
pub struct DiskSource {
    device: String,
    description: String,
    stat_path: PathBuf,
}

impl DiskSource {
    /// Create a source for the given block device under `/sys/block`.
    pub fn new(device: &str) -> Self {
        Self::with_root(device, SYS_BLOCK)
    }

    /// Create a source rooted at a different directory tree.
    ///
    /// Tests point this at a fabricated sysfs layout in a tempdir.
    pub fn with_root<P: AsRef<Path>>(device: &str, root: P) -> Self {
        let stat_path = root.as_ref().join(device).join("stat");
        let description = format!("disk: {}", stat_path.display());
        debug!(device, "opening disk counter source");
        Self {
            device: device.to_string(),
            description,
            stat_path,
        }
    }

    fn parse_field(fields: &[&str], index: usize) -> Result<f64, SourceError> {
        let raw = fields
            .get(index)
            .ok_or_else(|| SourceError::Read(format!("stat line has no field {}", index + 1)))?;
        raw.parse::<f64>()
            .map_err(|e| SourceError::Read(format!("stat field {}: {}", index + 1, e)))
    }
}

impl CounterSource for DiskSource {
    fn is_available(&self) -> bool {
        self.stat_path.exists()
    }

    /// Sector counts are converted to bytes here so every source hands the
    /// estimator the same unit.
    fn read(&mut self) -> Result<CounterSnapshot, SourceError> {
        let content = fs::read_to_string(&self.stat_path)
            .map_err(|e| SourceError::Read(format!("{}: {}", self.stat_path.display(), e)))?;
        let fields: Vec<&str> = content.split_whitespace().collect();

        let rd = Self::parse_field(&fields, READ_SECTORS_FIELD)?;
        let wr = Self::parse_field(&fields, WRITE_SECTORS_FIELD)?;

        Ok(CounterSnapshot::new(
            Instant::now(),
            rd * SECTOR_SIZE,
            wr * SECTOR_SIZE,
        ))
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A realistic /sys/block/<dev>/stat line; fields 3 and 7 are the
    /// sector counters.
    const STAT_LINE: &str =
        "  121391     9049  8724692    66090   173034   84419 10765193   89176        0   99032   159281\n";

    fn fake_disk(root: &TempDir, dev: &str, stat: &str) {
        let dir = root.path().join(dev);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stat"), stat).unwrap();
    }

    #[test]
    fn test_available_when_stat_exists() {
        let root = TempDir::new().unwrap();
        fake_disk(&root, "sda", STAT_LINE);

        let source = DiskSource::with_root("sda", root.path());
        assert!(source.is_available());
    }

    #[test]
    fn test_unavailable_when_stat_missing() {
        let root = TempDir::new().unwrap();

        let source = DiskSource::with_root("sda", root.path());
        assert!(!source.is_available());
    }

    #[test]
    fn test_read_scales_sectors_to_bytes() {
        let root = TempDir::new().unwrap();
        fake_disk(&root, "sda", STAT_LINE);

        let mut source = DiskSource::with_root("sda", root.path());
        let snapshot = source.read().unwrap();
        assert_eq!(snapshot.counter_in, 8_724_692.0 * 512.0);
        assert_eq!(snapshot.counter_out, 10_765_193.0 * 512.0);
    }

    #[test]
    fn test_read_fails_on_short_line() {
        let root = TempDir::new().unwrap();
        fake_disk(&root, "sda", "1 2 3\n");

        let mut source = DiskSource::with_root("sda", root.path());
        let err = source.read().unwrap_err();
        assert!(matches!(err, SourceError::Read(_)));
    }

    #[test]
    fn test_read_fails_on_garbage_field() {
        let root = TempDir::new().unwrap();
        fake_disk(&root, "sda", "0 0 xyz 0 0 0 10 0 0 0 0\n");

        let mut source = DiskSource::with_root("sda", root.path());
        assert!(matches!(source.read(), Err(SourceError::Read(_))));
    }

    #[test]
    fn test_read_fails_when_file_vanishes() {
        let root = TempDir::new().unwrap();

        let mut source = DiskSource::with_root("sda", root.path());
        assert!(matches!(source.read(), Err(SourceError::Read(_))));
    }
}
