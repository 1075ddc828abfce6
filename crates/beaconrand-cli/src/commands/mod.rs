pub mod analyze;
pub mod export;
pub mod inspect;

use beaconrand_core::{AnalysisError, SampleSet, load_samples};

/// Load a sample log, exiting with a diagnostic on fatal failure.
///
/// Per-record problems are already counted inside the returned set; only an
/// unreadable file or a log with zero valid records aborts.
pub fn load_or_exit(log_file: &str) -> SampleSet {
    match load_samples(log_file) {
        Ok(set) => set,
        Err(AnalysisError::EmptyInput) => {
            eprintln!("No valid records found in {log_file}.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to load {log_file}: {e}");
            std::process::exit(1);
        }
    }
}
