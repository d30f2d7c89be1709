//! # random-write-bench
//!
//! A deterministic scatter-write micro-benchmark.
//!
//! [`RandomWriteBenchmark`] fills a source buffer with pseudo-random values
//! from a fixed seed, then on every execution writes each value into a
//! same-sized destination buffer at `value % size`. The access pattern is
//! identical on every run and platform, so the only thing that varies is how
//! fast the memory system absorbs the writes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use random_write_bench::{RandomWriteBenchmark, SweepConfig, SweepRunner};
//!
//! let config = SweepConfig::from_env().min_size(1_000).max_size(1_000_000);
//! let mut runner = SweepRunner::with_config(config);
//! let sweep = runner.run(&mut RandomWriteBenchmark::new())?;
//!
//! for r in &sweep.results {
//!     println!("{}: {:?} us/op", r.size, r.time_per_op());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The benchmark itself only knows `initialize` and `execute`; the runner,
//! reporters and configuration sit on top of it.

mod benchmark;
mod config;
mod context;
mod error;
mod logging;
mod report;
mod result;
mod rng;
mod runner;

pub use benchmark::{Benchmark, RandomWriteBenchmark, SEED, WARMUP_EXECUTIONS};
pub use config::{parse_seconds, SweepConfig};
pub use context::RunContext;
pub use error::BenchError;
pub use logging::init_logging;
pub use report::{ConsoleReporter, CsvReporter, JsonReporter, Reporter, CSV_HEADER};
pub use result::{SizeResult, SweepResult};
pub use rng::JavaRandom;
pub use runner::SweepRunner;
