//! Fixed-depth smoothing history for display rates.

/// Total samples retained per channel.
pub const STORE_DEPTH: usize = 20;

/// How many of the newest samples are averaged into the displayed rate.
pub const CALC_DEPTH: usize = 4;

/// A most-recent-first ring of rate samples for one channel.
///
/// The buffer starts zero-filled, so during the first `CALC_DEPTH - 1`
/// ticks the average counts the missing slots as zero and a cold monitor
/// ramps up from 0 instead of jumping.
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    slots: [u64; STORE_DEPTH],
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl SmoothingWindow {
    pub fn new() -> Self {
        Self {
            slots: [0; STORE_DEPTH],
        }
    }

    /// Insert a rate at the front; the oldest slot falls off silently.
    pub fn push(&mut self, rate: u64) {
        self.slots.rotate_right(1);
        self.slots[0] = rate;
    }

    /// Average of the newest `CALC_DEPTH` slots, rounded down.
    pub fn display_value(&self) -> u64 {
        let sum: u64 = self.slots[..CALC_DEPTH].iter().sum();
        sum / CALC_DEPTH as u64
    }

    /// Maximum over the whole window.
    pub fn history_max(&self) -> u64 {
        self.slots.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_displays_zero() {
        let window = SmoothingWindow::new();
        assert_eq!(window.display_value(), 0);
        assert_eq!(window.history_max(), 0);
    }

    #[test]
    fn test_partial_fill_counts_missing_slots_as_zero() {
        let mut window = SmoothingWindow::new();
        window.push(1000);
        window.push(3000);

        // (3000 + 1000 + 0 + 0) / 4
        assert_eq!(window.display_value(), 1000);
    }

    #[test]
    fn test_average_uses_only_newest_calc_depth() {
        let mut window = SmoothingWindow::new();
        for rate in [100, 200, 300, 400, 500, 600] {
            window.push(rate);
        }

        // newest four are 600, 500, 400, 300
        assert_eq!(window.display_value(), (600 + 500 + 400 + 300) / 4);
    }

    #[test]
    fn test_average_rounds_down() {
        let mut window = SmoothingWindow::new();
        window.push(1);
        window.push(1);
        window.push(1);
        assert_eq!(window.display_value(), 0);
    }

    #[test]
    fn test_overflow_discards_oldest() {
        let mut window = SmoothingWindow::new();
        window.push(9999);
        for _ in 0..STORE_DEPTH {
            window.push(1);
        }

        // the 9999 has been pushed off the back
        assert_eq!(window.history_max(), 1);
    }

    #[test]
    fn test_history_max_spans_full_window() {
        let mut window = SmoothingWindow::new();
        window.push(7000);
        // bury the peak past the averaging sub-window but inside the ring
        for _ in 0..(STORE_DEPTH - 1) {
            window.push(10);
        }

        assert_eq!(window.display_value(), 10);
        assert_eq!(window.history_max(), 7000);
    }
}
