//! Delta-to-rate conversion with reset and clock-anomaly handling.

use crate::source::CounterSnapshot;

/// An instantaneous throughput pair in bytes/second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateSample {
    pub rate_in: u64,
    pub rate_out: u64,
}

/// Converts successive counter snapshots into instantaneous rates.
///
/// The estimator holds the last known-good snapshot. A failed read must
/// not advance it, so callers simply skip `update` on failure and the next
/// good snapshot is compared against the last one that parsed, never
/// against a zero or a stale timestamp.
#[derive(Debug, Default)]
pub struct RateEstimator {
    prev: Option<CounterSnapshot>,
    last: RateSample,
}

impl RateEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the estimator with an initial snapshot.
    ///
    /// Without a seed, the first `update` would rate the counters'
    /// since-boot totals and report a huge spurious spike.
    pub fn seed(&mut self, snapshot: CounterSnapshot) {
        self.prev = Some(snapshot);
    }

    /// Whether a previous snapshot is held.
    pub fn is_seeded(&self) -> bool {
        self.prev.is_some()
    }

    /// Fold the next snapshot into the estimator.
    ///
    /// Returns `None` on the seed tick (no previous snapshot yet) and when
    /// the elapsed time between snapshots is not positive; in both cases
    /// the previously computed rate stays in effect via [`last`]. On a
    /// non-positive elapsed time the stored snapshot does not advance.
    pub fn update(&mut self, snapshot: CounterSnapshot) -> Option<RateSample> {
        let Some(prev) = self.prev else {
            self.prev = Some(snapshot);
            return None;
        };

        let elapsed = snapshot.timestamp.duration_since(prev.timestamp).as_secs_f64();
        if elapsed <= 0.0 {
            return None;
        }

        let sample = RateSample {
            rate_in: channel_rate(prev.counter_in, snapshot.counter_in, elapsed),
            rate_out: channel_rate(prev.counter_out, snapshot.counter_out, elapsed),
        };

        self.prev = Some(snapshot);
        self.last = sample;
        Some(sample)
    }

    /// The most recent successfully computed sample (zeros before any).
    pub fn last(&self) -> RateSample {
        self.last
    }
}

/// A counter that went backwards was reset: the new value is the total
/// accrued since the reset, so it is rated as-is instead of producing a
/// negative delta or a wrapped giant.
fn channel_rate(prev: f64, curr: f64, elapsed: f64) -> u64 {
    let delta = if curr < prev { curr } else { curr - prev };
    (delta / elapsed).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn snap(t: Instant, offset: Duration, rx: f64, tx: f64) -> CounterSnapshot {
        CounterSnapshot::new(t + offset, rx, tx)
    }

    #[test]
    fn test_seed_tick_produces_no_sample() {
        let t0 = Instant::now();
        let mut est = RateEstimator::new();

        assert!(est.update(snap(t0, Duration::ZERO, 1_000_000.0, 500.0)).is_none());
        assert_eq!(est.last(), RateSample::default());
        assert!(est.is_seeded());
    }

    #[test]
    fn test_constant_delta_converges_to_rate() {
        let t0 = Instant::now();
        let mut est = RateEstimator::new();
        est.seed(snap(t0, Duration::ZERO, 1000.0, 2000.0));

        // 1000 in / 500 out per second, three ticks
        for i in 1..=3u64 {
            let s = est
                .update(snap(
                    t0,
                    Duration::from_secs(i),
                    1000.0 + 1000.0 * i as f64,
                    2000.0 + 500.0 * i as f64,
                ))
                .unwrap();
            assert_eq!(s.rate_in, 1000);
            assert_eq!(s.rate_out, 500);
        }
    }

    #[test]
    fn test_network_scenario_exact() {
        // rx_bytes 1000 -> 2000 over 1.0s => 1000 B/s
        let t0 = Instant::now();
        let mut est = RateEstimator::new();
        est.seed(snap(t0, Duration::ZERO, 1000.0, 0.0));

        let s = est.update(snap(t0, Duration::from_secs(1), 2000.0, 0.0)).unwrap();
        assert_eq!(s.rate_in, 1000);
        assert_eq!(s.rate_out, 0);
    }

    #[test]
    fn test_disk_scenario_exact() {
        // read sectors 10 -> 20 over 0.5s, pre-scaled to bytes by the
        // source: (20-10)*512/0.5 = 10240 B/s
        let t0 = Instant::now();
        let mut est = RateEstimator::new();
        est.seed(snap(t0, Duration::ZERO, 10.0 * 512.0, 0.0));

        let s = est
            .update(snap(t0, Duration::from_millis(500), 20.0 * 512.0, 0.0))
            .unwrap();
        assert_eq!(s.rate_in, 10240);
    }

    #[test]
    fn test_counter_reset_is_not_negative() {
        // 5000 -> 100 over 1.0s: reported as 100/1.0, never negative
        let t0 = Instant::now();
        let mut est = RateEstimator::new();
        est.seed(snap(t0, Duration::ZERO, 5000.0, 5000.0));

        let s = est.update(snap(t0, Duration::from_secs(1), 100.0, 100.0)).unwrap();
        assert_eq!(s.rate_in, 100);
        assert_eq!(s.rate_out, 100);
    }

    #[test]
    fn test_rates_never_negative_across_mixed_sequence() {
        let t0 = Instant::now();
        let mut est = RateEstimator::new();
        est.seed(snap(t0, Duration::ZERO, 0.0, 0.0));

        let counters = [100.0, 2500.0, 40.0, 40.0, 9000.0];
        for (i, &c) in counters.iter().enumerate() {
            if let Some(s) = est.update(snap(t0, Duration::from_secs(i as u64 + 1), c, c)) {
                // u64 can't be negative; the real assertion is that the
                // reset branch produced a sane finite value
                assert!(s.rate_in < 1_000_000);
                assert!(s.rate_out < 1_000_000);
            }
        }
    }

    #[test]
    fn test_zero_elapsed_is_a_noop() {
        let t0 = Instant::now();
        let mut est = RateEstimator::new();
        est.seed(snap(t0, Duration::ZERO, 1000.0, 1000.0));

        let first = est.update(snap(t0, Duration::from_secs(1), 2000.0, 2000.0)).unwrap();

        // Same timestamp again: no update, previous rate still in effect
        assert!(est.update(snap(t0, Duration::from_secs(1), 9999.0, 9999.0)).is_none());
        assert_eq!(est.last(), first);

        // The stored snapshot did not advance, so the next good sample is
        // rated against the last accepted one
        let s = est.update(snap(t0, Duration::from_secs(2), 3000.0, 3000.0)).unwrap();
        assert_eq!(s.rate_in, 1000);
    }

    #[test]
    fn test_rounds_to_nearest() {
        let t0 = Instant::now();
        let mut est = RateEstimator::new();
        est.seed(snap(t0, Duration::ZERO, 0.0, 0.0));

        // 1001 bytes over 2s = 500.5 B/s, rounds to 501
        let s = est.update(snap(t0, Duration::from_secs(2), 1001.0, 0.0)).unwrap();
        assert_eq!(s.rate_in, 501);
    }
}
