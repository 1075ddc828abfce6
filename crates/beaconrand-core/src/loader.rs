//! JSONL sample loader.
//!
//! Reads line-delimited JSON records produced by a beacon-chain collection
//! process. Each record carries an epoch identifier and either a
//! 256-character binary string or a hex seed. Field names differ between
//! collector versions, so extraction is driven by a [`FieldMap`] listing the
//! candidate names for each role.
//!
//! Per-record failures are dropped and counted, never fatal; only a log with
//! zero valid records aborts the run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use crate::error::AnalysisError;
use crate::sample::{DropCounters, SEED_BITS, Sample, SampleSet};

/// Candidate field names for each record role, tried in order.
///
/// The default covers the known collector schemas: head-state loggers emit
/// `epoch` + `randao_bits`/`randao_hex`, finalized-seed loggers emit
/// `epoch_finalized` + `randao_seed_for_next_epoch`. A precomputed binary
/// field is preferred over a hex seed when both are present.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub epoch: Vec<String>,
    pub bits: Vec<String>,
    pub hex: Vec<String>,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            epoch: vec!["epoch".into(), "epoch_finalized".into()],
            bits: vec!["randao_bits".into()],
            hex: vec![
                "randao_hex".into(),
                "randao_seed_for_next_epoch".into(),
                "randao".into(),
            ],
        }
    }
}

/// How a single record failed.
enum RecordError {
    /// Malformed JSON or missing/mistyped fields.
    Parse,
    /// Payload present but violating the 256-bit {0,1} invariant.
    Validation,
}

/// Load a sample set from a JSONL log using the default field map.
pub fn load_samples(path: impl AsRef<Path>) -> Result<SampleSet, AnalysisError> {
    load_samples_with(path, &FieldMap::default())
}

/// Load a sample set from a JSONL log with an explicit field map.
pub fn load_samples_with(
    path: impl AsRef<Path>,
    map: &FieldMap,
) -> Result<SampleSet, AnalysisError> {
    let file = File::open(path)?;
    parse_records(BufReader::new(file), map)
}

/// Parse records from any line source. Pure apart from warn-level logging.
pub fn parse_records<R: BufRead>(reader: R, map: &FieldMap) -> Result<SampleSet, AnalysisError> {
    let mut dropped = DropCounters::default();
    let mut parsed = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_record(trimmed, map) {
            Ok(sample) => parsed.push(sample),
            Err(RecordError::Parse) => {
                dropped.parse_errors += 1;
                log::warn!("skipping malformed record at line {}", line_no + 1);
            }
            Err(RecordError::Validation) => {
                dropped.validation_errors += 1;
                log::warn!("dropping invalid bit payload at line {}", line_no + 1);
            }
        }
    }

    SampleSet::new(parsed, dropped)
}

fn parse_record(line: &str, map: &FieldMap) -> Result<Sample, RecordError> {
    let value: Value = serde_json::from_str(line).map_err(|_| RecordError::Parse)?;

    let epoch = extract_epoch(&value, map).ok_or(RecordError::Parse)?;

    if let Some(bit_str) = first_string(&value, &map.bits) {
        let bits = bit_str_to_bits(bit_str).ok_or(RecordError::Validation)?;
        return Sample::new(epoch, bits, None).ok_or(RecordError::Validation);
    }

    if let Some(hex) = first_string(&value, &map.hex) {
        let bits = hex_to_bits(hex).ok_or(RecordError::Validation)?;
        return Sample::new(epoch, bits, Some(hex.to_string())).ok_or(RecordError::Validation);
    }

    Err(RecordError::Parse)
}

fn extract_epoch(value: &Value, map: &FieldMap) -> Option<u64> {
    for field in &map.epoch {
        if let Some(v) = value.get(field) {
            if let Some(e) = v.as_u64() {
                return Some(e);
            }
            // Some collectors stringify numbers.
            if let Some(s) = v.as_str() {
                if let Ok(e) = s.parse::<u64>() {
                    return Some(e);
                }
            }
            return None;
        }
    }
    None
}

fn first_string<'a>(value: &'a Value, candidates: &[String]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
}

/// Parse a 256-character binary string into a bit vector.
pub fn bit_str_to_bits(s: &str) -> Option<Vec<u8>> {
    if s.len() != SEED_BITS {
        return None;
    }
    s.chars()
        .map(|c| match c {
            '0' => Some(0),
            '1' => Some(1),
            _ => None,
        })
        .collect()
}

/// Expand a hex seed into a 256-bit MSB-first vector.
///
/// Accepts an optional `0x` prefix and mixed case. The value is zero-padded
/// on the left to 256 bits; more than 64 hex digits cannot fit and fail.
pub fn hex_to_bits(hex: &str) -> Option<Vec<u8>> {
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
    if digits.is_empty() || digits.len() > SEED_BITS / 4 {
        return None;
    }

    let mut bits = vec![0u8; SEED_BITS - digits.len() * 4];
    for c in digits.chars() {
        let nibble = c.to_digit(16)? as u8;
        for shift in (0..4).rev() {
            bits.push((nibble >> shift) & 1);
        }
    }
    Some(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    fn parse(input: &str) -> Result<SampleSet, AnalysisError> {
        parse_records(Cursor::new(input), &FieldMap::default())
    }

    fn bit_line(epoch: u64, bit: char) -> String {
        format!(
            "{{\"epoch\": {}, \"randao_bits\": \"{}\"}}",
            epoch,
            std::iter::repeat(bit).take(SEED_BITS).collect::<String>()
        )
    }

    #[test]
    fn parses_head_state_records() {
        let input = format!("{}\n{}\n", bit_line(10, '0'), bit_line(11, '1'));
        let set = parse(&input).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.epoch_range(), (10, 11));
        assert_eq!(set.dropped().total(), 0);
    }

    #[test]
    fn parses_finalized_seed_records() {
        let hex = format!("0x{}", "ab".repeat(32));
        let input = format!(
            "{{\"epoch_finalized\": 7, \"randao_seed_for_next_epoch\": \"{hex}\"}}\n"
        );
        let set = parse(&input).unwrap();
        assert_eq!(set.len(), 1);
        let sample = set.get(0).unwrap();
        assert_eq!(sample.epoch, 7);
        assert_eq!(sample.hex.as_deref(), Some(hex.as_str()));
        // 0xab = 10101011, repeated over all 32 bytes
        assert_eq!(&sample.bits[..8], &[1, 0, 1, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn prefers_binary_field_over_hex() {
        let input = format!(
            "{{\"epoch\": 1, \"randao_bits\": \"{}\", \"randao_hex\": \"0xff\"}}\n",
            "0".repeat(SEED_BITS)
        );
        let set = parse(&input).unwrap();
        assert_eq!(set.get(0).unwrap().ones(), 0);
    }

    #[test]
    fn counts_malformed_lines_as_parse_errors() {
        let input = format!("not json\n{{\"epoch\": 1}}\n{}\n", bit_line(2, '1'));
        let set = parse(&input).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped().parse_errors, 2);
    }

    #[test]
    fn counts_invalid_payloads_as_validation_errors() {
        let short = "{\"epoch\": 1, \"randao_bits\": \"0101\"}".to_string();
        let charset = format!(
            "{{\"epoch\": 2, \"randao_bits\": \"{}x\"}}",
            "0".repeat(SEED_BITS - 1)
        );
        let input = format!("{short}\n{charset}\n{}\n", bit_line(3, '0'));
        let set = parse(&input).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped().validation_errors, 2);
    }

    #[test]
    fn skips_blank_lines_without_counting() {
        let input = format!("\n\n{}\n   \n", bit_line(1, '0'));
        let set = parse(&input).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped().total(), 0);
    }

    #[test]
    fn duplicate_epochs_keep_first_record() {
        let input = format!("{}\n{}\n", bit_line(5, '1'), bit_line(5, '0'));
        let set = parse(&input).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().ones(), SEED_BITS);
        assert_eq!(set.dropped().duplicate_epochs, 1);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(parse(""), Err(AnalysisError::EmptyInput)));
        assert!(matches!(
            parse("garbage\n"),
            Err(AnalysisError::EmptyInput)
        ));
    }

    #[test]
    fn accepts_stringified_epoch() {
        let input = format!(
            "{{\"epoch\": \"42\", \"randao_bits\": \"{}\"}}\n",
            "1".repeat(SEED_BITS)
        );
        let set = parse(&input).unwrap();
        assert_eq!(set.get(0).unwrap().epoch, 42);
    }

    #[test]
    fn hex_expansion_pads_to_256_bits() {
        let bits = hex_to_bits("0xff").unwrap();
        assert_eq!(bits.len(), SEED_BITS);
        assert_eq!(bits.iter().map(|&b| b as usize).sum::<usize>(), 8);
        assert_eq!(&bits[SEED_BITS - 8..], &[1; 8]);
    }

    #[test]
    fn hex_expansion_rejects_bad_input() {
        assert!(hex_to_bits("").is_none());
        assert!(hex_to_bits("0x").is_none());
        assert!(hex_to_bits("zz").is_none());
        assert!(hex_to_bits(&"f".repeat(65)).is_none());
        assert!(hex_to_bits(&"f".repeat(64)).is_some());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}\n{}\n", bit_line(1, '0'), bit_line(2, '1')).unwrap();
        let set = load_samples(file.path()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_samples("/nonexistent/randao.jsonl").unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));
        assert!(err.is_fatal());
    }
}
