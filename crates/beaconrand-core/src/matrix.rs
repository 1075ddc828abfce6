//! Bit matrix derived from a sample set.
//!
//! Row i is sample i's 256-bit vector; the backing storage is row-major, so
//! the same buffer doubles as the flattened bitstream consumed by the
//! sequence-level tests. All tests share this structure read-only.

use crate::sample::{SEED_BITS, SampleSet};

/// N×256 bit matrix with a row-major flattened view.
#[derive(Debug, Clone, PartialEq)]
pub struct BitMatrix {
    rows: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Materialize the matrix from a sample set. O(N·256).
    pub fn from_samples(samples: &SampleSet) -> Self {
        let rows = samples.len();
        let mut data = Vec::with_capacity(rows * SEED_BITS);
        for sample in samples.iter() {
            data.extend_from_slice(&sample.bits);
        }
        Self { rows, data }
    }

    /// Number of rows (samples).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of bits, rows × 256.
    pub fn total_bits(&self) -> usize {
        self.data.len()
    }

    /// Row `i` as a 256-bit slice.
    pub fn row(&self, i: usize) -> &[u8] {
        &self.data[i * SEED_BITS..(i + 1) * SEED_BITS]
    }

    /// Iterator over all rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(SEED_BITS)
    }

    /// Number of one-bits in column `j` across all rows.
    pub fn column_ones(&self, j: usize) -> usize {
        debug_assert!(j < SEED_BITS);
        self.data
            .iter()
            .skip(j)
            .step_by(SEED_BITS)
            .map(|&b| b as usize)
            .sum()
    }

    /// The row-major flattened bitstream of length rows × 256.
    pub fn bitstream(&self) -> &[u8] {
        &self.data
    }

    /// Number of one-bits in the whole matrix.
    pub fn ones(&self) -> usize {
        self.data.iter().map(|&b| b as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{DropCounters, Sample};

    fn sample_set(rows: &[(u64, Vec<u8>)]) -> SampleSet {
        let parsed = rows
            .iter()
            .map(|(epoch, bits)| Sample::new(*epoch, bits.clone(), None).unwrap())
            .collect();
        SampleSet::new(parsed, DropCounters::default()).unwrap()
    }

    #[test]
    fn matrix_shape_matches_sample_set() {
        let set = sample_set(&[(0, vec![0; SEED_BITS]), (1, vec![1; SEED_BITS])]);
        let m = BitMatrix::from_samples(&set);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.total_bits(), 2 * SEED_BITS);
        assert_eq!(m.row(0), &[0u8; SEED_BITS][..]);
        assert_eq!(m.row(1), &[1u8; SEED_BITS][..]);
    }

    #[test]
    fn column_ones_sum_equals_stream_ones() {
        // Mixed rows: alternating and constant patterns.
        let alt: Vec<u8> = (0..SEED_BITS).map(|i| (i % 2) as u8).collect();
        let set = sample_set(&[
            (0, alt.clone()),
            (1, vec![1; SEED_BITS]),
            (2, vec![0; SEED_BITS]),
        ]);
        let m = BitMatrix::from_samples(&set);
        let column_total: usize = (0..SEED_BITS).map(|j| m.column_ones(j)).sum();
        assert_eq!(column_total, m.ones());
        assert_eq!(m.ones(), SEED_BITS / 2 + SEED_BITS);
    }

    #[test]
    fn bitstream_is_row_major() {
        let alt: Vec<u8> = (0..SEED_BITS).map(|i| (i % 2) as u8).collect();
        let set = sample_set(&[(0, vec![1; SEED_BITS]), (1, alt)]);
        let m = BitMatrix::from_samples(&set);
        assert_eq!(&m.bitstream()[..SEED_BITS], &[1u8; SEED_BITS][..]);
        assert_eq!(m.bitstream()[SEED_BITS], 0);
        assert_eq!(m.bitstream()[SEED_BITS + 1], 1);
    }
}
