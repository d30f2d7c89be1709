//! Configuration for a size sweep.

use anyhow::{bail, Result};
use std::time::Duration;

/// Configuration for a size sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Smallest element count measured.
    pub min_size: usize,
    /// Largest element count measured (inclusive).
    pub max_size: usize,
    /// Time budget spent executing at each size.
    pub run_time: Duration,
    /// Label identifying this build/machine in reports.
    pub tag: String,
    /// Print progress to stderr.
    pub verbose: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_size: 1_000,
            max_size: 1_000_000,
            run_time: Duration::from_secs(1),
            tag: format!("R{}", env!("CARGO_PKG_VERSION")),
            verbose: true,
        }
    }
}

impl SweepConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from environment variables.
    ///
    /// Supported variables:
    /// - `RW_MIN_SIZE`: smallest size (default: 1000)
    /// - `RW_MAX_SIZE`: largest size (default: 1000000)
    /// - `RW_RUN_TIME_SECS`: seconds per size, fractions allowed (default: 1)
    /// - `RW_TAG`: report tag
    /// - `RW_VERBOSE`: verbose output (default: true)
    ///
    /// Unparseable values are ignored and keep their default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("RW_MIN_SIZE") {
            if let Ok(n) = v.parse() {
                cfg.min_size = n;
            }
        }
        if let Ok(v) = std::env::var("RW_MAX_SIZE") {
            if let Ok(n) = v.parse() {
                cfg.max_size = n;
            }
        }
        if let Ok(v) = std::env::var("RW_RUN_TIME_SECS") {
            if let Some(d) = parse_seconds(&v) {
                cfg.run_time = d;
            }
        }
        if let Ok(v) = std::env::var("RW_TAG") {
            cfg.tag = v;
        }
        if let Ok(v) = std::env::var("RW_VERBOSE") {
            cfg.verbose = v != "0" && !v.eq_ignore_ascii_case("false");
        }

        cfg
    }

    /// Set the smallest size.
    pub fn min_size(mut self, n: usize) -> Self {
        self.min_size = n;
        self
    }

    /// Set the largest size.
    pub fn max_size(mut self, n: usize) -> Self {
        self.max_size = n;
        self
    }

    /// Set the per-size time budget.
    pub fn run_time(mut self, d: Duration) -> Self {
        self.run_time = d;
        self
    }

    /// Set the report tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set verbose output.
    pub fn verbose(mut self, v: bool) -> Self {
        self.verbose = v;
        self
    }

    /// Check that the sweep describes at least one measurable size.
    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            bail!("min size must be positive");
        }
        if self.min_size > self.max_size {
            bail!(
                "min size {} is larger than max size {}",
                self.min_size,
                self.max_size
            );
        }
        if self.run_time.is_zero() {
            bail!("run time must be non-zero");
        }
        Ok(())
    }

    /// Sizes visited by the sweep: `min_size` times successive powers of ten.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        if self.min_size == 0 {
            return sizes;
        }
        let mut size = self.min_size;
        while size <= self.max_size {
            sizes.push(size);
            match size.checked_mul(10) {
                Some(next) => size = next,
                None => break,
            }
        }
        sizes
    }
}

/// Parse a non-negative, finite number of seconds.
pub fn parse_seconds(s: &str) -> Option<Duration> {
    let secs: f64 = s.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
