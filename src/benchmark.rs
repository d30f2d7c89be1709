//! The benchmark abstraction and the random scatter-write workload.

use crate::error::BenchError;
use crate::rng::JavaRandom;

/// Seed for the source sequence. Changing it changes every published number.
pub const SEED: u64 = 2939;

/// Number of untimed `execute` calls made at the end of `initialize`.
pub const WARMUP_EXECUTIONS: usize = 2;

/// A workload with an untimed setup phase and a repeatable timed phase.
pub trait Benchmark {
    /// Short identifier used in reports.
    fn name(&self) -> &str;

    /// Allocate state for `max_size` elements and warm it up.
    fn initialize(&mut self, max_size: usize) -> Result<(), BenchError>;

    /// Run the workload once over the first `size` elements.
    fn execute(&mut self, size: usize) -> Result<(), BenchError>;
}

/// Scatter-writes a fixed pseudo-random sequence into a same-sized buffer.
///
/// # Example
///
/// ```rust
/// use random_write_bench::{Benchmark, RandomWriteBenchmark};
///
/// let mut bench = RandomWriteBenchmark::new();
/// bench.initialize(1_000)?;
/// bench.execute(1_000)?;
/// assert_eq!(bench.destination().len(), 1_000);
/// # Ok::<(), random_write_bench::BenchError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RandomWriteBenchmark {
    source: Vec<u32>,
    destination: Vec<u32>,
}

impl RandomWriteBenchmark {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pseudo-random values, fixed since the last `initialize`.
    pub fn source(&self) -> &[u32] {
        &self.source
    }

    /// The buffer written by `execute`.
    pub fn destination(&self) -> &[u32] {
        &self.destination
    }

    /// Number of allocated elements (0 before the first `initialize`).
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    fn fill_source(size: usize) -> Vec<u32> {
        let mut rng = JavaRandom::new(SEED);
        (0..size).map(|_| rng.next_abs()).collect()
    }
}

impl Benchmark for RandomWriteBenchmark {
    fn name(&self) -> &str {
        "random_write"
    }

    fn initialize(&mut self, max_size: usize) -> Result<(), BenchError> {
        if max_size == 0 {
            return Err(BenchError::InvalidSize { size: max_size });
        }

        self.source = Self::fill_source(max_size);
        self.destination = vec![0; max_size];
        tracing::trace!(elements = max_size, "allocated scatter buffers");

        for _ in 0..WARMUP_EXECUTIONS {
            self.execute(max_size)?;
        }
        Ok(())
    }

    fn execute(&mut self, size: usize) -> Result<(), BenchError> {
        if size == 0 {
            return Err(BenchError::InvalidSize { size });
        }
        let len = self.source.len().min(self.destination.len());
        if size > len {
            return Err(BenchError::OutOfBounds { size, len });
        }

        // `value % size < size <= destination.len()`, so the index never fails.
        let destination = &mut self.destination[..size];
        for &value in &self.source[..size] {
            destination[value as usize % size] = value;
        }
        std::hint::black_box(&self.destination);
        Ok(())
    }
}
