//! Sweep result types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Measurements for one size of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeResult {
    /// Element count passed to `initialize` and `execute`.
    pub size: usize,
    /// Number of timed `execute` calls.
    pub runs: u64,
    /// Elements written in total: `runs * size`.
    pub ops: u64,
    /// Time spent inside the timed calls.
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
}

impl SizeResult {
    pub fn new(size: usize, runs: u64, elapsed: Duration) -> Self {
        Self {
            size,
            runs,
            ops: runs.saturating_mul(size as u64),
            elapsed,
        }
    }

    /// Base-10 logarithm of the size.
    pub fn log_size(&self) -> f64 {
        (self.size as f64).log10()
    }

    /// Mean microseconds per `execute` call.
    pub fn time_per_run(&self) -> Option<f64> {
        per(self.elapsed, self.runs)
    }

    /// Mean microseconds per element written.
    pub fn time_per_op(&self) -> Option<f64> {
        per(self.elapsed, self.ops)
    }

    /// Elements written per second.
    pub fn ops_per_sec(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.ops as f64 / secs)
    }
}

fn per(elapsed: Duration, count: u64) -> Option<f64> {
    (count > 0).then(|| elapsed.as_secs_f64() * 1_000_000.0 / count as f64)
}

/// Results for an entire sweep of one benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    /// Benchmark name
    pub benchmark: String,
    /// Report tag (build/machine label)
    pub tag: String,
    /// Per-size time budget
    #[serde(with = "duration_serde")]
    pub run_time: Duration,
    /// One entry per size, in sweep order
    pub results: Vec<SizeResult>,
    /// Wall time of the whole sweep, setup included
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Unix milliseconds when the sweep started
    pub started_at: String,
}

impl SweepResult {
    /// Find the measurements for a given size.
    pub fn get(&self, size: usize) -> Option<&SizeResult> {
        self.results.iter().find(|r| r.size == size)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_nanos().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let nanos = u64::deserialize(d)?;
        Ok(Duration::from_nanos(nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|a| (a - expected).abs() < 1e-6 * expected.abs().max(1.0))
    }

    #[test]
    fn should_derive_ops_when_constructed() {
        let r = SizeResult::new(1_000, 4, Duration::from_millis(2));
        assert_eq!(r.ops, 4_000);
        assert!(approx(r.time_per_run(), 500.0));
        assert!(approx(r.time_per_op(), 0.5));
        assert!(approx(r.ops_per_sec(), 2_000_000.0));
        assert!(approx(Some(r.log_size()), 3.0));
    }

    #[test]
    fn should_skip_rates_when_nothing_ran() {
        let r = SizeResult::new(10, 0, Duration::ZERO);
        assert_eq!(r.time_per_run(), None);
        assert_eq!(r.time_per_op(), None);
        assert_eq!(r.ops_per_sec(), None);
    }

    #[test]
    fn should_serialize_durations_as_nanos() {
        let r = SizeResult::new(10, 1, Duration::from_micros(3));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["elapsed"], 3_000);
        let back: SizeResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }
}
