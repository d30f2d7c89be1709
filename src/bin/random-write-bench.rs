//! random-write-bench: measure scatter-write throughput over a size sweep.
//!
//! ```text
//! random-write-bench                                  # 1e3..=1e6, 1s per size
//! random-write-bench --max-size 100000000 --run-time 5
//! random-write-bench --format csv --tag laptop > laptop.csv
//! random-write-bench --list-sizes --min-size 10 --max-size 10000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use random_write_bench::{
    init_logging, parse_seconds, CsvReporter, JsonReporter, RandomWriteBenchmark, Reporter,
    SweepConfig, SweepRunner,
};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned table on stderr
    Console,
    /// CSV data block on stdout
    Csv,
    /// Pretty JSON on stdout
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "random-write-bench",
    version,
    about = "Measure scatter-write throughput over a geometric size sweep",
    long_about = "
Fills a buffer with pseudo-random values from a fixed seed, then repeatedly
writes each value into a same-sized buffer at (value mod size). Every size from
--min-size to --max-size, growing by 10x, is executed for --run-time seconds.

Defaults can also come from RW_MIN_SIZE, RW_MAX_SIZE, RW_RUN_TIME_SECS,
RW_TAG and RW_VERBOSE. Flags win over the environment.
"
)]
struct Cli {
    /// Smallest number of elements
    #[arg(long, short = 'm')]
    min_size: Option<usize>,

    /// Largest number of elements (inclusive)
    #[arg(long, short = 'M')]
    max_size: Option<usize>,

    /// Seconds spent executing at each size (fractions allowed)
    #[arg(long, short = 't', value_parser = parse_run_time)]
    run_time: Option<Duration>,

    /// Label for this build or machine, printed in reports
    #[arg(long)]
    tag: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Console)]
    format: Format,

    /// Print the sizes of the sweep and exit
    #[arg(long)]
    list_sizes: bool,

    /// Debug-level diagnostics on stderr
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Only errors on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn parse_run_time(s: &str) -> Result<Duration, String> {
    parse_seconds(s).ok_or_else(|| format!("`{}` is not a non-negative number of seconds", s))
}

impl Cli {
    fn to_config(&self) -> SweepConfig {
        let mut cfg = SweepConfig::from_env();
        if let Some(n) = self.min_size {
            cfg.min_size = n;
        }
        if let Some(n) = self.max_size {
            cfg.max_size = n;
        }
        if let Some(d) = self.run_time {
            cfg.run_time = d;
        }
        if let Some(ref tag) = self.tag {
            cfg.tag = tag.clone();
        }
        if self.quiet || self.format != Format::Console {
            cfg.verbose = false;
        }
        cfg
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    });

    let config = cli.to_config();
    config.validate().context("invalid arguments")?;

    if cli.list_sizes {
        for size in config.sizes() {
            println!("{}", size);
        }
        return Ok(());
    }

    let mut runner = SweepRunner::with_config(config);
    match cli.format {
        Format::Console => {}
        Format::Csv => {
            let reporter: Box<dyn Reporter> = Box::new(CsvReporter::new(std::io::stdout()));
            runner.add_reporter(reporter);
        }
        Format::Json => {
            let reporter: Box<dyn Reporter> = Box::new(JsonReporter::new(std::io::stdout()));
            runner.add_reporter(reporter);
        }
    }

    let mut bench = RandomWriteBenchmark::new();
    runner.run(&mut bench).context("benchmark sweep failed")?;

    Ok(())
}
