//! # beaconrand-core
//!
//! Core data model for auditing the randomness of a beacon-chain RANDAO
//! stream: one 256-bit value per epoch, collected into an ordered,
//! deduplicated sample set and materialized as a bit matrix that the
//! statistical test battery consumes read-only.
//!
//! ## Quick Start
//!
//! ```no_run
//! use beaconrand_core::{BitMatrix, load_samples};
//!
//! let samples = load_samples("randao_log.jsonl")?;
//! println!(
//!     "{} samples, epochs {:?}",
//!     samples.len(),
//!     samples.epoch_range()
//! );
//!
//! let matrix = BitMatrix::from_samples(&samples);
//! assert_eq!(matrix.total_bits(), samples.len() * 256);
//! # Ok::<(), beaconrand_core::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! Loader → SampleSet → BitMatrix → test battery (see `beaconrand-tests`)
//!
//! The loader is a pure function of its input: malformed or invalid records
//! are dropped and counted, duplicate epochs keep their first occurrence,
//! and only a log with zero valid records is fatal.

pub mod config;
pub mod error;
pub mod loader;
pub mod matrix;
pub mod sample;

pub use config::{AnalysisConfig, BASIC_MAX_LAG, DEFAULT_MAX_LAG, DEFAULT_SEED, TestSelection, Thresholds};
pub use error::AnalysisError;
pub use loader::{FieldMap, bit_str_to_bits, hex_to_bits, load_samples, load_samples_with, parse_records};
pub use matrix::BitMatrix;
pub use sample::{DropCounters, SEED_BITS, Sample, SampleSet};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
