//! Pluggable reporters for sweep output.
//!
//! Reporters never fail a sweep: write errors are logged with `tracing` and
//! dropped. Each result line is written in one call so output cannot
//! interleave with log lines.

use crate::config::SweepConfig;
use crate::result::{SizeResult, SweepResult};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Trait for sweep result reporters.
pub trait Reporter: Send + Sync {
    /// Called once before the first size.
    fn sweep_start(&self, _benchmark: &str, _config: &SweepConfig) {}

    /// Called before a size is initialized.
    fn size_start(&self, _size: usize) {}

    /// Called when a size has been measured.
    fn size_end(&self, _result: &SizeResult) {}

    /// Called once after the last size.
    fn sweep_end(&self, _result: &SweepResult) {}
}

/// Header row of a CSV data block.
pub const CSV_HEADER: &str = "Size,log(size),Runs,Ops,Time/run (us),Time/Op (us)";

const SIZE_WIDTH: usize = 14;
const RUNS_WIDTH: usize = 10;
const TIME_WIDTH: usize = 14;

/// Human-readable table on stderr.
pub struct ConsoleReporter {
    output_lock: Mutex<()>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            output_lock: Mutex::new(()),
        }
    }

    fn format_line(result: &SizeResult) -> String {
        let per_run = result
            .time_per_run()
            .map(|us| format_duration(Duration::from_secs_f64(us / 1_000_000.0)))
            .unwrap_or_else(|| "-".to_string());
        let throughput = result
            .ops_per_sec()
            .map(format_throughput)
            .unwrap_or_default();

        format!(
            "  {:>size_w$} {:>runs_w$} runs {:>time_w$}/run  {}",
            result.size,
            result.runs,
            per_run,
            throughput,
            size_w = SIZE_WIDTH,
            runs_w = RUNS_WIDTH,
            time_w = TIME_WIDTH,
        )
    }

    fn write_stderr(&self, message: &str) {
        let _guard = self.output_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut stderr = std::io::stderr().lock();
        if let Err(e) = writeln!(stderr, "{}", message) {
            tracing::warn!(error = %e, "failed to write to stderr");
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn sweep_start(&self, benchmark: &str, config: &SweepConfig) {
        let header = format!(
            "---------------------------------------------------------------\n\
             Benchmark: {} [{}]\n\
             Sizes: {}..={}, {} per size\n\
             ---------------------------------------------------------------",
            benchmark,
            config.tag,
            config.min_size,
            config.max_size,
            format_duration(config.run_time)
        );
        self.write_stderr(&header);
    }

    fn size_end(&self, result: &SizeResult) {
        self.write_stderr(&Self::format_line(result));
    }

    fn sweep_end(&self, result: &SweepResult) {
        let footer = format!(
            "---------------------------------------------------------------\n\
             Measured {} sizes in {}\n\
             ---------------------------------------------------------------",
            result.results.len(),
            format_duration(result.total_duration)
        );
        self.write_stderr(&footer);
    }
}

/// Writes one CSV data block per sweep: tag line, header line, one row per size.
pub struct CsvReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> CsvReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write CSV output");
        }
    }

    fn format_row(result: &SizeResult) -> String {
        format!(
            "{},{:.2},{},{},{},{}",
            result.size,
            result.log_size(),
            result.runs,
            result.ops,
            format_micros(result.time_per_run()),
            format_micros(result.time_per_op()),
        )
    }
}

impl<W: Write + Send> Reporter for CsvReporter<W> {
    fn sweep_start(&self, _benchmark: &str, config: &SweepConfig) {
        self.write_line(&format!("{}\n{}", config.tag, CSV_HEADER));
    }

    fn size_end(&self, result: &SizeResult) {
        self.write_line(&Self::format_row(result));
    }
}

/// Writes the full `SweepResult` as pretty JSON when the sweep ends.
pub struct JsonReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Reporter for JsonReporter<W> {
    fn sweep_end(&self, result: &SweepResult) {
        let json = match serde_json::to_string_pretty(result) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize sweep result");
                return;
            }
        };
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{}", json).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to write JSON output");
        }
    }
}

/// Format a duration with consistent units: ns, µs, ms, or s.
fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", d.as_secs_f64() * 1_000_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", d.as_secs_f64() * 1_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

fn format_throughput(ops_per_sec: f64) -> String {
    if ops_per_sec >= 1_000_000_000.0 {
        format!("({:.2}G ops/s)", ops_per_sec / 1_000_000_000.0)
    } else if ops_per_sec >= 1_000_000.0 {
        format!("({:.2}M ops/s)", ops_per_sec / 1_000_000.0)
    } else if ops_per_sec >= 1_000.0 {
        format!("({:.2}K ops/s)", ops_per_sec / 1_000.0)
    } else {
        format!("({:.0} ops/s)", ops_per_sec)
    }
}

fn format_micros(us: Option<f64>) -> String {
    us.map(|v| format!("{:.6}", v)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(results: Vec<SizeResult>) -> SweepResult {
        SweepResult {
            benchmark: "random_write".to_string(),
            tag: "T1".to_string(),
            run_time: Duration::from_millis(10),
            results,
            total_duration: Duration::from_millis(25),
            started_at: "0".to_string(),
        }
    }

    #[test]
    fn should_format_duration_in_appropriate_units() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert!(format_duration(Duration::from_micros(100)).ends_with("µs"));
        assert!(format_duration(Duration::from_millis(500)).ends_with("ms"));
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn should_pick_throughput_unit_by_magnitude() {
        assert_eq!(format_throughput(2_500_000.0), "(2.50M ops/s)");
        assert_eq!(format_throughput(1_500.0), "(1.50K ops/s)");
        assert_eq!(format_throughput(12.0), "(12 ops/s)");
    }

    #[test]
    fn should_write_tag_header_and_rows_when_csv() {
        let reporter = CsvReporter::new(Vec::new());
        let config = SweepConfig::new().tag("T1").min_size(10).max_size(100);

        reporter.sweep_start("random_write", &config);
        reporter.size_end(&SizeResult::new(10, 2, Duration::from_micros(4)));
        reporter.size_end(&SizeResult::new(100, 1, Duration::from_micros(10)));

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "T1");
        assert_eq!(lines[1], CSV_HEADER);
        assert!(lines[2].starts_with("10,1.00,2,20,"));
        assert!(lines[3].starts_with("100,2.00,1,100,"));
    }

    #[test]
    fn should_leave_rates_empty_when_no_runs() {
        let row = CsvReporter::<Vec<u8>>::format_row(&SizeResult::new(10, 0, Duration::ZERO));
        assert_eq!(row, "10,1.00,0,0,,");
    }

    #[test]
    fn should_emit_parseable_json_when_sweep_ends() {
        let reporter = JsonReporter::new(Vec::new());
        reporter.sweep_end(&sweep(vec![SizeResult::new(10, 3, Duration::from_micros(9))]));

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let back: SweepResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back.benchmark, "random_write");
        assert_eq!(back.results.len(), 1);
        assert_eq!(back.results[0].ops, 30);
    }

    #[test]
    fn should_align_console_columns() {
        let line = ConsoleReporter::format_line(&SizeResult::new(1_000, 5, Duration::from_millis(1)));
        assert!(line.contains("1000"));
        assert!(line.contains("5 runs"));
        assert!(line.contains("ops/s"));
    }
}
