//! Timing accumulator for the repeated phase at one size.

use std::time::{Duration, Instant};

/// Accumulates timed executions until a time budget is spent.
///
/// Only time spent inside `measure` counts against the budget, so setup and
/// bookkeeping between runs never shorten the measured window.
#[derive(Debug)]
pub struct RunContext {
    budget: Duration,
    pub(crate) elapsed: Duration,
    pub(crate) runs: u64,
}

impl RunContext {
    pub(crate) fn new(budget: Duration) -> Self {
        Self {
            budget,
            elapsed: Duration::ZERO,
            runs: 0,
        }
    }

    /// True once at least one run was recorded and the budget is used up.
    pub fn is_done(&self) -> bool {
        self.runs > 0 && self.elapsed >= self.budget
    }

    /// Time a single execution and add it to the totals.
    ///
    /// The closure's result is returned untouched, errors included.
    pub fn measure<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.elapsed += start.elapsed();
        self.runs += 1;
        result
    }

    /// Manually record a run timed elsewhere.
    pub fn record(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.runs += 1;
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_measure_duration_when_called() {
        let mut ctx = RunContext::new(Duration::from_secs(60));
        ctx.measure(|| std::thread::sleep(Duration::from_millis(10)));

        assert_eq!(ctx.runs(), 1);
        assert!(ctx.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn should_not_be_done_when_nothing_ran() {
        let ctx = RunContext::new(Duration::ZERO);
        assert!(!ctx.is_done());
    }

    #[test]
    fn should_be_done_when_budget_spent() {
        let mut ctx = RunContext::new(Duration::from_millis(5));
        ctx.record(Duration::from_millis(3));
        assert!(!ctx.is_done());
        ctx.record(Duration::from_millis(3));
        assert!(ctx.is_done());
        assert_eq!(ctx.runs(), 2);
    }

    #[test]
    fn should_pass_result_through_when_measuring() {
        let mut ctx = RunContext::new(Duration::from_secs(1));
        let r: Result<u8, &str> = ctx.measure(|| Err("boom"));
        assert_eq!(r, Err("boom"));
    }
}
