//! Persisted settings for the display collaborator.
//!
//! The engine takes a [`MonitorConfig`]; this module owns the JSON
//! settings file the CLI reads and writes. Maxima are stored in KiB/s and
//! scaled to bytes/s when converted into an engine configuration. Bar
//! colors live here too; the engine never sees them.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{DeviceKind, MonitorConfig, INIT_MAX};

/// Default bar color for the inbound channel.
pub const DEFAULT_COLOR_IN: &str = "#FF4F00";

/// Default bar color for the outbound channel.
pub const DEFAULT_COLOR_OUT: &str = "#FFE500";

/// On-disk settings, one JSON object.
///
/// Unknown fields are ignored and missing fields fall back to defaults,
/// so the file survives version skew in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Device name; empty means unconfigured.
    pub device: String,
    pub kind: DeviceKind,
    pub update_interval_ms: u64,
    /// Fixed inbound maximum, KiB/s.
    pub max_in_kib: u64,
    /// Fixed outbound maximum, KiB/s.
    pub max_out_kib: u64,
    pub auto_max: bool,
    pub color_in: String,
    pub color_out: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: String::new(),
            kind: DeviceKind::Net,
            update_interval_ms: 250,
            max_in_kib: INIT_MAX / 1024,
            max_out_kib: INIT_MAX / 1024,
            auto_max: true,
            color_in: DEFAULT_COLOR_IN.to_string(),
            color_out: DEFAULT_COLOR_OUT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing settings from {}", path.display()))
    }

    /// Write the settings back as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))
    }

    /// Convert into the engine configuration, scaling the stored KiB/s
    /// maxima to bytes/s.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            device: self.device.clone(),
            kind: self.kind,
            interval: Duration::from_millis(self.update_interval_ms),
            fixed_max_in: Some(self.max_in_kib * 1024),
            fixed_max_out: Some(self.max_out_kib * 1024),
            auto_max: self.auto_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json")).unwrap();

        assert_eq!(settings.device, "");
        assert_eq!(settings.update_interval_ms, 250);
        assert!(settings.auto_max);
        assert_eq!(settings.color_in, DEFAULT_COLOR_IN);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.device = "eth0".to_string();
        settings.kind = DeviceKind::Disk;
        settings.update_interval_ms = 500;
        settings.max_in_kib = 2048;
        settings.auto_max = false;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.device, "eth0");
        assert_eq!(loaded.kind, DeviceKind::Disk);
        assert_eq!(loaded.update_interval_ms, 500);
        assert_eq!(loaded.max_in_kib, 2048);
        assert!(!loaded.auto_max);
    }

    #[test]
    fn test_monitor_config_scales_kib_to_bytes() {
        let mut settings = Settings::default();
        settings.device = "sda".to_string();
        settings.max_in_kib = 100;
        settings.max_out_kib = 50;

        let config = settings.monitor_config();
        assert_eq!(config.fixed_max_in, Some(100 * 1024));
        assert_eq!(config.fixed_max_out, Some(50 * 1024));
        assert_eq!(config.interval, Duration::from_millis(250));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"device": "wlan0"}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.device, "wlan0");
        assert_eq!(settings.update_interval_ms, 250);
        assert_eq!(settings.kind, DeviceKind::Net);
    }
}
