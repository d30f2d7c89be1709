//! The size-sweep runner.

use crate::benchmark::Benchmark;
use crate::config::SweepConfig;
use crate::context::RunContext;
use crate::report::{ConsoleReporter, Reporter};
use crate::result::{SizeResult, SweepResult};
use anyhow::{Context, Result};
use std::hint::black_box;
use std::time::Instant;

/// Drives a [`Benchmark`] across a geometric range of sizes.
///
/// For each size the benchmark is initialized (untimed, warm-up included) and
/// then executed repeatedly until the configured time budget is spent.
///
/// # Example
///
/// ```rust,no_run
/// use random_write_bench::{RandomWriteBenchmark, SweepConfig, SweepRunner};
///
/// let config = SweepConfig::new().min_size(1_000).max_size(100_000);
/// let mut runner = SweepRunner::with_config(config);
/// let result = runner.run(&mut RandomWriteBenchmark::new())?;
/// println!("{} sizes measured", result.results.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct SweepRunner {
    config: SweepConfig,
    reporters: Vec<Box<dyn Reporter>>,
}

impl SweepRunner {
    /// Create a runner with config from the environment.
    pub fn new() -> Self {
        Self::with_config(SweepConfig::from_env())
    }

    /// Create a runner with explicit config.
    ///
    /// A console reporter is installed when the config is verbose.
    pub fn with_config(config: SweepConfig) -> Self {
        let mut reporters: Vec<Box<dyn Reporter>> = Vec::new();
        if config.verbose {
            reporters.push(Box::new(ConsoleReporter::new()));
        }
        Self { config, reporters }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Replace reporters with a custom set.
    pub fn reporters(&mut self, reporters: Vec<Box<dyn Reporter>>) -> &mut Self {
        self.reporters = reporters;
        self
    }

    /// Add an additional reporter.
    pub fn add_reporter(&mut self, reporter: Box<dyn Reporter>) -> &mut Self {
        self.reporters.push(reporter);
        self
    }

    /// Measure `bench` at every size of the sweep.
    ///
    /// Fails on invalid config or on the first benchmark error; sizes already
    /// reported stay reported.
    pub fn run<B>(&mut self, bench: &mut B) -> Result<SweepResult>
    where
        B: Benchmark + ?Sized,
    {
        self.config.validate().context("invalid sweep configuration")?;

        let started_at = unix_millis();
        let sweep_start = Instant::now();
        let name = bench.name().to_string();

        tracing::info!(
            benchmark = %name,
            min_size = self.config.min_size,
            max_size = self.config.max_size,
            run_time_ms = self.config.run_time.as_millis() as u64,
            "starting sweep"
        );
        for r in &self.reporters {
            r.sweep_start(&name, &self.config);
        }

        let mut results = Vec::new();
        for size in self.config.sizes() {
            let result = self.run_size(bench, size)?;
            for r in &self.reporters {
                r.size_end(&result);
            }
            results.push(result);
        }

        let sweep = SweepResult {
            benchmark: name,
            tag: self.config.tag.clone(),
            run_time: self.config.run_time,
            results,
            total_duration: sweep_start.elapsed(),
            started_at,
        };

        for r in &self.reporters {
            r.sweep_end(&sweep);
        }
        tracing::info!(
            benchmark = %sweep.benchmark,
            sizes = sweep.results.len(),
            elapsed_ms = sweep.total_duration.as_millis() as u64,
            "sweep finished"
        );

        Ok(sweep)
    }

    fn run_size<B>(&self, bench: &mut B, size: usize) -> Result<SizeResult>
    where
        B: Benchmark + ?Sized,
    {
        for r in &self.reporters {
            r.size_start(size);
        }

        bench
            .initialize(size)
            .with_context(|| format!("failed to initialize {} at size {}", bench.name(), size))?;

        let mut ctx = RunContext::new(self.config.run_time);
        while !ctx.is_done() {
            ctx.measure(|| black_box(&mut *bench).execute(black_box(size)))
                .with_context(|| format!("execute failed at size {}", size))?;
        }

        let result = SizeResult::new(size, ctx.runs(), ctx.elapsed());
        tracing::debug!(
            size,
            runs = result.runs,
            ops = result.ops,
            elapsed_us = result.elapsed.as_micros() as u64,
            "size measured"
        );
        Ok(result)
    }
}

impl Default for SweepRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_millis() -> String {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_millis())
}
