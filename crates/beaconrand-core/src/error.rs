//! Error types shared across the workspace.
//!
//! Per-record problems (malformed JSON, bad bit strings) are never errors —
//! the loader drops and counts them. Only total data absence is fatal; a
//! single test running out of samples marks that test unavailable while the
//! rest of the battery proceeds.

use thiserror::Error;

/// Errors surfaced by the loader and the test battery.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input log could not be read at all.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Zero valid records remained after parsing and validation.
    #[error("no valid records found in input log")]
    EmptyInput,

    /// A single test lacks the samples it needs; the battery continues.
    #[error("{test}: need at least {needed} samples, got {got}")]
    InsufficientData {
        test: &'static str,
        needed: usize,
        got: usize,
    },
}

impl AnalysisError {
    /// True for conditions that abort the run before any test executes.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AnalysisError::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_fatal() {
        assert!(AnalysisError::EmptyInput.is_fatal());
    }

    #[test]
    fn insufficient_data_is_not_fatal() {
        let err = AnalysisError::InsufficientData {
            test: "hamming_distance",
            needed: 2,
            got: 1,
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("hamming_distance"));
    }
}
