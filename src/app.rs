//! Application state for the display collaborator.
//!
//! The [`App`] owns the engine's [`Monitor`] and the interval clock. Ticks
//! and reconfiguration both run on the event-loop thread, so they can
//! never interleave; the mutual exclusion the engine's single-owner model
//! relies on comes for free.

use std::time::{Duration, Instant};

use crate::data::{Monitor, MonitorConfig, Reading};
use crate::ui::Theme;

/// Bounds for the interactive interval adjustment, matching the original
/// dialog's 0.1 - 10 s spinner range.
const MIN_INTERVAL_MS: i64 = 100;
const MAX_INTERVAL_MS: i64 = 10_000;

/// How long a transient status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub paused: bool,
    pub theme: Theme,

    monitor: Monitor,
    last_tick: Instant,
    status_message: Option<(String, Instant)>,
}

impl App {
    /// Create an App around an already-configured monitor.
    pub fn new(monitor: Monitor, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            paused: false,
            theme,
            monitor,
            last_tick: Instant::now(),
            status_message: None,
        }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Latest published engine output.
    pub fn reading(&self) -> &Reading {
        self.monitor.poll()
    }

    /// Advance the monitor if the configured interval has elapsed.
    ///
    /// Called once per event-loop wakeup; returns true when a tick ran and
    /// the display should redraw with fresh numbers.
    pub fn maybe_tick(&mut self) -> bool {
        if self.paused || self.last_tick.elapsed() < self.monitor.interval() {
            return false;
        }
        self.monitor.tick();
        self.last_tick = Instant::now();
        true
    }

    /// Replace the monitor wholesale with a freshly configured one.
    ///
    /// Histories and ceilings restart from their initial state; stale
    /// backup counters from the old instance are never compared against
    /// the new device's counters. Returns false when the configuration was
    /// rejected, in which case the old monitor keeps running.
    pub fn reconfigure(&mut self, config: MonitorConfig) -> bool {
        match Monitor::configure(config) {
            Ok(monitor) => {
                self.monitor = monitor;
                self.last_tick = Instant::now();
                true
            }
            Err(err) => {
                self.set_status_message(format!("reconfigure failed: {}", err));
                false
            }
        }
    }

    /// Flip between automatic and fixed maximum.
    pub fn toggle_auto_max(&mut self) {
        let mut config = self.monitor.config().clone();
        config.auto_max = !config.auto_max;
        let label = if config.auto_max {
            "automatic maximum"
        } else {
            "fixed maximum"
        };
        if self.reconfigure(config) {
            self.set_status_message(format!("switched to {}", label));
        }
    }

    /// Nudge the update interval, clamped to the supported range.
    pub fn adjust_interval(&mut self, delta_ms: i64) {
        let current = self.monitor.interval().as_millis() as i64;
        let next = (current + delta_ms).clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS);
        if next == current {
            return;
        }

        let mut config = self.monitor.config().clone();
        config.interval = Duration::from_millis(next as u64);
        if self.reconfigure(config) {
            self.set_status_message(format!("update interval {} ms", next));
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        let message = if self.paused { "paused" } else { "resumed" };
        self.set_status_message(message.to_string());
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set a temporary status message shown in place of the status bar.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// The current status message, if it hasn't expired yet.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((message, since)) if since.elapsed() < STATUS_MESSAGE_TTL => Some(message),
            _ => None,
        }
    }
}
