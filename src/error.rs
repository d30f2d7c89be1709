//! Errors raised by benchmark operations.

use thiserror::Error;

/// Failure of a single `initialize` or `execute` call.
///
/// Neither variant is recoverable for the call that produced it; buffers are
/// left exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BenchError {
    /// A zero element count was requested.
    #[error("invalid size {size}: element count must be positive")]
    InvalidSize { size: usize },

    /// `execute` was asked to touch more elements than were allocated.
    #[error("size {size} exceeds allocated buffer length {len}")]
    OutOfBounds { size: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_both_sizes_when_out_of_bounds() {
        let msg = BenchError::OutOfBounds { size: 10, len: 5 }.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('5'));
    }
}
