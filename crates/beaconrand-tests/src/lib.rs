//! Statistical randomness test battery for 256-bit RANDAO samples.
//!
//! Seven tests run independently over a shared read-only [`BitMatrix`]:
//! per-column bit bias, Hamming distances (consecutive and random pairs),
//! Shannon entropy, autocorrelation, and the classic monobit, runs, and
//! 2-bit serial tests. [`run_battery`] executes the selected tests and
//! aggregates their results into an [`AnalysisReport`] with a
//! GOOD/FAIR/POOR assessment plus issue and warning lists.
//!
//! Every test is a pure function of its input; the only internal randomness
//! (random-pair sampling) comes from an explicitly seeded generator, so a
//! rerun on identical input produces a bit-identical report.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, ChiSquared, ContinuousCDF, Discrete, StudentsT};
use statrs::function::erf::erfc;

use beaconrand_core::{
    AnalysisConfig, AnalysisError, BitMatrix, DropCounters, SEED_BITS, SampleSet, TestSelection,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Distribution summaries
// ═══════════════════════════════════════════════════════════════════════════════

/// Five-number summary of a value series (population standard deviation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionSummary {
    pub n: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl DistributionSummary {
    /// Summarize a non-empty series. An empty series yields all zeros.
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                n: 0,
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
                median: 0.0,
            };
        }
        let nf = n as f64;
        let mean = values.iter().sum::<f64>() / nf;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / nf;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        Self {
            n,
            mean,
            std: var.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            median,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Statistical primitives
// ═══════════════════════════════════════════════════════════════════════════════

/// Exact two-sided binomial-tail p-value for observing `k` successes in `n`
/// trials with success probability `p`.
///
/// Sums the probability of every outcome no more likely than the observed
/// one (the minlike convention), so for p=0.5 this is the probability of a
/// deviation from n/2 at least as extreme as the one observed.
pub fn exact_binomial_two_sided(k: u64, n: u64, p: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let dist = Binomial::new(p, n).unwrap();
    let observed = dist.pmf(k.min(n));
    // Tolerance absorbs floating-point noise in pmf comparisons.
    let cutoff = observed * (1.0 + 1e-7);
    let mut total = 0.0;
    for i in 0..=n {
        let pi = dist.pmf(i);
        if pi <= cutoff {
            total += pi;
        }
    }
    total.min(1.0)
}

/// Welch's unequal-variance two-sample t-test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WelchTTest {
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Run Welch's t-test between two samples, flagging at `alpha`.
///
/// Returns `None` when either group has fewer than two values or both
/// variances are zero — degenerate inputs where no comparison is possible.
pub fn welch_t_test(a: &[f64], b: &[f64], alpha: f64) -> Option<WelchTTest> {
    let (na, nb) = (a.len(), b.len());
    if na < 2 || nb < 2 {
        return None;
    }
    let (naf, nbf) = (na as f64, nb as f64);
    let mean_a = a.iter().sum::<f64>() / naf;
    let mean_b = b.iter().sum::<f64>() / nbf;
    // Sample variance (n-1 denominator), as the t-test requires.
    let var_a = a.iter().map(|v| (v - mean_a) * (v - mean_a)).sum::<f64>() / (naf - 1.0);
    let var_b = b.iter().map(|v| (v - mean_b) * (v - mean_b)).sum::<f64>() / (nbf - 1.0);

    let se_a = var_a / naf;
    let se_b = var_b / nbf;
    let se2 = se_a + se_b;
    if se2 <= 0.0 {
        return None;
    }

    let t = (mean_a - mean_b) / se2.sqrt();
    // Welch–Satterthwaite degrees of freedom.
    let df = se2 * se2 / (se_a * se_a / (naf - 1.0) + se_b * se_b / (nbf - 1.0));
    let dist = StudentsT::new(0.0, 1.0, df).unwrap();
    let p = 2.0 * dist.sf(t.abs());

    Some(WelchTTest {
        t_statistic: t,
        degrees_of_freedom: df,
        p_value: p,
        significant: p < alpha,
    })
}

/// Hamming distance between two equal-length bit slices.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).filter(|(x, y)| x != y).count() as u32
}

/// Two-symbol Shannon entropy of a {0,1} distribution with one-probability
/// `p`, in bits. 0·log2(0) is taken as 0, so the result lies in [0, 1].
fn bit_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    let q = 1.0 - p;
    -p * p.log2() - q * q.log2()
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. Bit bias test
// ═══════════════════════════════════════════════════════════════════════════════

/// One column flagged as significantly biased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiasedColumn {
    /// Bit position, 0 (MSB) to 255.
    pub position: usize,
    /// Observed frequency of ones.
    pub bias: f64,
    pub p_value: f64,
    pub ones: usize,
    /// |bias − 0.5|.
    pub deviation: f64,
}

/// Per-column bias analysis across all 256 bit positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BitBiasResult {
    /// Frequency of ones per column, length 256.
    pub biases: Vec<f64>,
    pub mean_abs_bias: f64,
    pub median_abs_bias: f64,
    pub max_abs_bias: f64,
    /// Columns with p < alpha, in position order.
    pub flagged: Vec<BiasedColumn>,
    pub alpha: f64,
    pub n_samples: usize,
}

/// Exact binomial test of every column against p = 0.5.
///
/// The 256 columns are tested independently at `alpha` with no
/// multiple-comparison correction, so a couple of chance flags are expected
/// even on ideal input; the aggregator only warns above a count threshold.
pub fn bit_bias_test(matrix: &BitMatrix, alpha: f64) -> Result<BitBiasResult, AnalysisError> {
    let n = matrix.rows();
    if n == 0 {
        return Err(AnalysisError::InsufficientData {
            test: "bit_bias",
            needed: 1,
            got: 0,
        });
    }

    let nf = n as f64;
    let mut biases = Vec::with_capacity(SEED_BITS);
    let mut deviations = Vec::with_capacity(SEED_BITS);
    let mut flagged = Vec::new();

    for position in 0..SEED_BITS {
        let ones = matrix.column_ones(position);
        let bias = ones as f64 / nf;
        let deviation = (bias - 0.5).abs();
        let p_value = exact_binomial_two_sided(ones as u64, n as u64, 0.5);
        if p_value < alpha {
            flagged.push(BiasedColumn {
                position,
                bias,
                p_value,
                ones,
                deviation,
            });
        }
        biases.push(bias);
        deviations.push(deviation);
    }

    let summary = DistributionSummary::from_values(&deviations);
    Ok(BitBiasResult {
        biases,
        mean_abs_bias: summary.mean,
        median_abs_bias: summary.median,
        max_abs_bias: summary.max,
        flagged,
        alpha,
        n_samples: n,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. Hamming distance test
// ═══════════════════════════════════════════════════════════════════════════════

/// Distance series for one pairing strategy plus its summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistanceStats {
    pub values: Vec<u32>,
    pub summary: DistributionSummary,
}

impl DistanceStats {
    fn from_values(values: Vec<u32>) -> Self {
        let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Self {
            summary: DistributionSummary::from_values(&as_f64),
            values,
        }
    }
}

/// Hamming-distance analysis over consecutive and random sample pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HammingResult {
    pub consecutive: DistanceStats,
    pub random: DistanceStats,
    /// Expected mean under a uniform model.
    pub expected_mean: f64,
    /// Expected standard deviation under a uniform model.
    pub expected_std: f64,
    /// Consecutive vs random comparison; `None` on degenerate variances.
    pub welch: Option<WelchTTest>,
    pub seed: u64,
}

/// Bit-difference counts for all consecutive pairs and for
/// min(1000, max(10, N/2)) random distinct pairs drawn from a generator
/// seeded with `seed`.
pub fn hamming_distance_test(
    matrix: &BitMatrix,
    seed: u64,
    alpha: f64,
) -> Result<HammingResult, AnalysisError> {
    let n = matrix.rows();
    if n < 2 {
        return Err(AnalysisError::InsufficientData {
            test: "hamming_distance",
            needed: 2,
            got: n,
        });
    }

    let consecutive: Vec<u32> = (0..n - 1)
        .map(|i| hamming_distance(matrix.row(i), matrix.row(i + 1)))
        .collect();

    let n_pairs = 1000.min(10.max(n / 2));
    let mut rng = StdRng::seed_from_u64(seed);
    let mut random = Vec::with_capacity(n_pairs);
    for _ in 0..n_pairs {
        let i = rng.random_range(0..n);
        let mut j = rng.random_range(0..n);
        while j == i {
            j = rng.random_range(0..n);
        }
        random.push(hamming_distance(matrix.row(i), matrix.row(j)));
    }

    let consecutive_f: Vec<f64> = consecutive.iter().map(|&v| v as f64).collect();
    let random_f: Vec<f64> = random.iter().map(|&v| v as f64).collect();
    let welch = welch_t_test(&consecutive_f, &random_f, alpha);

    Ok(HammingResult {
        consecutive: DistanceStats::from_values(consecutive),
        random: DistanceStats::from_values(random),
        expected_mean: SEED_BITS as f64 / 2.0,
        expected_std: 8.0,
        welch,
        seed,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. Shannon entropy test
// ═══════════════════════════════════════════════════════════════════════════════

/// Entropy of 8-bit chunks, averaged over all chunks of all samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ByteEntropyStats {
    pub mean: f64,
    pub std: f64,
    pub chunks: usize,
}

/// Shannon entropy analysis at three granularities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntropyResult {
    /// Per-sample 2-symbol entropy, one value in [0, 1] per row.
    pub per_sample: Vec<f64>,
    pub sample_summary: DistributionSummary,
    /// Entropy of the 0/1 frequency over the whole bitstream.
    pub overall: f64,
    /// 2-symbol entropy per 8-bit chunk, max 1.0 (bit-level, not an
    /// 8-bit-alphabet measure).
    pub byte_wise: ByteEntropyStats,
    /// Min-entropy of the pooled bitstream, −log2 max(p, 1−p).
    pub min_entropy: f64,
    /// Ideal value for every entropy figure here.
    pub expected: f64,
}

/// Per-sample, overall, and byte-wise Shannon entropy.
pub fn entropy_test(matrix: &BitMatrix) -> Result<EntropyResult, AnalysisError> {
    let n = matrix.rows();
    if n == 0 {
        return Err(AnalysisError::InsufficientData {
            test: "shannon_entropy",
            needed: 1,
            got: 0,
        });
    }

    let mut per_sample = Vec::with_capacity(n);
    let mut chunk_entropies = Vec::with_capacity(n * (SEED_BITS / 8));
    for row in matrix.iter_rows() {
        let ones: usize = row.iter().map(|&b| b as usize).sum();
        per_sample.push(bit_entropy(ones as f64 / SEED_BITS as f64));

        for chunk in row.chunks_exact(8) {
            let chunk_ones: usize = chunk.iter().map(|&b| b as usize).sum();
            chunk_entropies.push(bit_entropy(chunk_ones as f64 / 8.0));
        }
    }

    let total_bits = matrix.total_bits() as f64;
    let p_overall = matrix.ones() as f64 / total_bits;
    let overall = bit_entropy(p_overall);
    let min_entropy = -p_overall.max(1.0 - p_overall).log2();

    let chunk_summary = DistributionSummary::from_values(&chunk_entropies);
    Ok(EntropyResult {
        sample_summary: DistributionSummary::from_values(&per_sample),
        per_sample,
        overall,
        byte_wise: ByteEntropyStats {
            mean: chunk_summary.mean,
            std: chunk_summary.std,
            chunks: chunk_summary.n,
        },
        min_entropy,
        expected: 1.0,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. Autocorrelation test
// ═══════════════════════════════════════════════════════════════════════════════

/// A lag whose correlation exceeds the confidence bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlaggedLag {
    pub lag: usize,
    pub correlation: f64,
}

/// Autocorrelation profile of the flattened ±1-mapped bitstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutocorrelationResult {
    /// Correlation per lag, index = lag; entry 0 is 1.0 by definition.
    pub correlations: Vec<f64>,
    /// Effective lag ceiling, possibly reduced on short streams.
    pub max_lag: usize,
    /// 95% confidence bound, 1.96/√total_bits.
    pub confidence_bound: f64,
    /// Lags in [1, max_lag] exceeding the bound, ascending.
    pub flagged: Vec<FlaggedLag>,
    /// Largest |correlation| over lags ≥ 1.
    pub max_abs_correlation: f64,
    pub total_bits: usize,
}

/// Correlation of the {0,1}→{−1,+1} mapped stream with its lag-shifted
/// copies, normalized by the overlap length.
pub fn autocorrelation_test(
    bits: &[u8],
    max_lag: usize,
) -> Result<AutocorrelationResult, AnalysisError> {
    let n = bits.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData {
            test: "autocorrelation",
            needed: 2,
            got: n,
        });
    }

    let mut max_lag = max_lag;
    if n < 2 * max_lag {
        max_lag = n / 2;
        log::debug!("reduced autocorrelation max_lag to {max_lag} for {n} bits");
    }

    let mapped: Vec<i64> = bits.iter().map(|&b| 2 * b as i64 - 1).collect();
    let confidence_bound = 1.96 / (n as f64).sqrt();

    let mut correlations = Vec::with_capacity(max_lag + 1);
    correlations.push(1.0);
    let mut flagged = Vec::new();
    let mut max_abs = 0.0f64;

    for lag in 1..=max_lag {
        let overlap = n - lag;
        let sum: i64 = (0..overlap).map(|i| mapped[i] * mapped[i + lag]).sum();
        let corr = sum as f64 / overlap as f64;
        if corr.abs() > max_abs {
            max_abs = corr.abs();
        }
        if corr.abs() > confidence_bound {
            flagged.push(FlaggedLag {
                lag,
                correlation: corr,
            });
        }
        correlations.push(corr);
    }

    Ok(AutocorrelationResult {
        correlations,
        max_lag,
        confidence_bound,
        flagged,
        max_abs_correlation: max_abs,
        total_bits: n,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// 5. Monobit, runs, serial
// ═══════════════════════════════════════════════════════════════════════════════

/// Monobit frequency test result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonobitResult {
    pub ones: usize,
    pub zeros: usize,
    /// S = |ones − zeros| / √n.
    pub statistic: f64,
    pub p_value: f64,
    pub alpha: f64,
    pub passed: bool,
}

/// Proportion of ones vs zeros over the flattened bitstream.
pub fn monobit_test(bits: &[u8], alpha: f64) -> Result<MonobitResult, AnalysisError> {
    let n = bits.len();
    if n == 0 {
        return Err(AnalysisError::InsufficientData {
            test: "monobit",
            needed: 1,
            got: 0,
        });
    }
    let ones: usize = bits.iter().map(|&b| b as usize).sum();
    let zeros = n - ones;
    let statistic = (ones as f64 - zeros as f64).abs() / (n as f64).sqrt();
    let p_value = erfc(statistic / 2.0_f64.sqrt());
    Ok(MonobitResult {
        ones,
        zeros,
        statistic,
        p_value,
        alpha,
        passed: p_value >= alpha,
    })
}

/// Runs test result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunsResult {
    /// Observed maximal runs of identical consecutive bits.
    pub runs: usize,
    pub expected_runs: f64,
    pub variance: f64,
    pub z_score: f64,
    pub p_value: f64,
    pub proportion_ones: f64,
    pub alpha: f64,
    pub passed: bool,
}

/// Count of maximal same-bit runs against the expectation 2np(1−p).
///
/// A degenerate stream (all zeros or all ones) has zero variance; the test
/// reports p = 1.0 rather than dividing by zero.
pub fn runs_test(bits: &[u8], alpha: f64) -> Result<RunsResult, AnalysisError> {
    let n = bits.len();
    if n == 0 {
        return Err(AnalysisError::InsufficientData {
            test: "runs",
            needed: 1,
            got: 0,
        });
    }

    let mut runs = 1usize;
    for i in 1..n {
        if bits[i] != bits[i - 1] {
            runs += 1;
        }
    }

    let nf = n as f64;
    let p = bits.iter().map(|&b| b as usize).sum::<usize>() as f64 / nf;
    let pq = p * (1.0 - p);
    let expected_runs = 2.0 * nf * pq;
    let variance = 2.0 * nf * pq * (1.0 - 2.0 * pq);

    let (z_score, p_value) = if variance < 1e-12 {
        (0.0, 1.0)
    } else {
        let z = (runs as f64 - expected_runs) / variance.sqrt();
        (z, erfc(z.abs() / 2.0_f64.sqrt()))
    };

    Ok(RunsResult {
        runs,
        expected_runs,
        variance,
        z_score,
        p_value,
        proportion_ones: p,
        alpha,
        passed: p_value >= alpha,
    })
}

/// Serial (2-bit) test result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialResult {
    /// Counts of the overlapping patterns 00, 01, 10, 11.
    pub counts: [u64; 4],
    pub expected_per_category: f64,
    pub chi_squared: f64,
    pub p_value: f64,
    pub alpha: f64,
    pub passed: bool,
}

/// Chi-square test of overlapping 2-bit window frequencies (3 degrees of
/// freedom).
pub fn serial_test(bits: &[u8], alpha: f64) -> Result<SerialResult, AnalysisError> {
    let n = bits.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData {
            test: "serial",
            needed: 2,
            got: n,
        });
    }

    let mut counts = [0u64; 4];
    for pair in bits.windows(2) {
        counts[(pair[0] * 2 + pair[1]) as usize] += 1;
    }

    let expected = (n - 1) as f64 / 4.0;
    let chi_squared: f64 = counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let p_value = ChiSquared::new(3.0).unwrap().sf(chi_squared);

    Ok(SerialResult {
        counts,
        expected_per_category: expected,
        chi_squared,
        p_value,
        alpha,
        passed: p_value >= alpha,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Battery
// ═══════════════════════════════════════════════════════════════════════════════

/// Run metadata echoed into the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMeta {
    pub samples: usize,
    pub bit_length: usize,
    pub epoch_start: u64,
    pub epoch_end: u64,
    pub dropped: DropCounters,
    pub config: AnalysisConfig,
}

/// All test results plus the aggregated summary.
///
/// Each test slot is `None` when that test was unavailable for this input
/// (the summary then carries a warning naming it).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub meta: RunMeta,
    pub bit_bias: Option<BitBiasResult>,
    pub hamming: Option<HammingResult>,
    pub entropy: Option<EntropyResult>,
    pub autocorrelation: Option<AutocorrelationResult>,
    pub monobit: Option<MonobitResult>,
    pub runs: Option<RunsResult>,
    pub serial: Option<SerialResult>,
    pub summary: Summary,
}

/// Run the selected battery over a sample set.
pub fn run_battery(samples: &SampleSet, config: &AnalysisConfig) -> AnalysisReport {
    let matrix = BitMatrix::from_samples(samples);
    let stream = matrix.bitstream();
    let thresholds = &config.thresholds;
    let max_lag = config.effective_max_lag();

    let mut unavailable = Vec::new();
    let mut note = |name: &str, err: AnalysisError| {
        log::warn!("{name} test unavailable: {err}");
        unavailable.push(format!("{name} test unavailable: {err}"));
    };

    let bit_bias = bit_bias_test(&matrix, thresholds.bias_alpha)
        .map_err(|e| note("bit bias", e))
        .ok();
    let hamming = hamming_distance_test(&matrix, config.seed, thresholds.hamming_alpha)
        .map_err(|e| note("hamming distance", e))
        .ok();
    let entropy = entropy_test(&matrix).map_err(|e| note("entropy", e)).ok();
    let autocorrelation = autocorrelation_test(stream, max_lag)
        .map_err(|e| note("autocorrelation", e))
        .ok();

    let (monobit, runs, serial) = match config.selection {
        TestSelection::Basic => (None, None, None),
        TestSelection::Full => (
            monobit_test(stream, thresholds.monobit_alpha)
                .map_err(|e| note("monobit", e))
                .ok(),
            runs_test(stream, thresholds.runs_alpha)
                .map_err(|e| note("runs", e))
                .ok(),
            serial_test(stream, thresholds.serial_alpha)
                .map_err(|e| note("serial", e))
                .ok(),
        ),
    };

    let (epoch_start, epoch_end) = samples.epoch_range();
    let summary = summarize(
        bit_bias.as_ref(),
        hamming.as_ref(),
        entropy.as_ref(),
        autocorrelation.as_ref(),
        monobit.as_ref(),
        runs.as_ref(),
        serial.as_ref(),
        thresholds,
        samples.dropped(),
        &unavailable,
    );

    AnalysisReport {
        meta: RunMeta {
            samples: samples.len(),
            bit_length: SEED_BITS,
            epoch_start,
            epoch_end,
            dropped: samples.dropped(),
            config: config.clone(),
        },
        bit_bias,
        hamming,
        entropy,
        autocorrelation,
        monobit,
        runs,
        serial,
        summary,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Aggregation
// ═══════════════════════════════════════════════════════════════════════════════

/// Flagged-column count above which a warning is emitted.
const BIASED_COLUMNS_WARN: usize = 5;

/// Entropy deficit above this warns even when below the issue threshold.
const ENTROPY_DEFICIT_WARN: f64 = 0.001;

/// Pooled min-entropy below this warns.
const MIN_ENTROPY_WARN: f64 = 0.99;

/// Overall verdict derived from the issue count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Assessment {
    Good,
    Fair,
    Poor,
}

impl Assessment {
    fn from_issue_count(issues: usize) -> Self {
        match issues {
            0 => Assessment::Good,
            1..=2 => Assessment::Fair,
            _ => Assessment::Poor,
        }
    }

    /// Human-readable verdict line.
    pub fn describe(&self) -> &'static str {
        match self {
            Assessment::Good => "GOOD - no major randomness issues detected",
            Assessment::Fair => "FAIR - minor issues detected",
            Assessment::Poor => "POOR - multiple randomness issues detected",
        }
    }
}

impl std::fmt::Display for Assessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Assessment::Good => "GOOD",
            Assessment::Fair => "FAIR",
            Assessment::Poor => "POOR",
        };
        f.write_str(s)
    }
}

/// One row of the metrics table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRow {
    pub name: String,
    pub observed: f64,
    pub expected: String,
    pub passed: bool,
}

/// Aggregated verdict with supporting detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub assessment: Assessment,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub metrics: Vec<MetricRow>,
}

/// Combine test results into the overall assessment.
///
/// Issue triggers (fixed): mean |bias − 0.5| above the threshold, the
/// consecutive Hamming mean drifting from 128 beyond tolerance, a mean
/// sample-entropy deficit above the threshold, and any flagged
/// autocorrelation lag. Everything softer lands in warnings.
#[allow(clippy::too_many_arguments)]
pub fn summarize(
    bit_bias: Option<&BitBiasResult>,
    hamming: Option<&HammingResult>,
    entropy: Option<&EntropyResult>,
    autocorrelation: Option<&AutocorrelationResult>,
    monobit: Option<&MonobitResult>,
    runs: Option<&RunsResult>,
    serial: Option<&SerialResult>,
    thresholds: &beaconrand_core::Thresholds,
    dropped: DropCounters,
    unavailable: &[String],
) -> Summary {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut metrics = Vec::new();

    if let Some(bias) = bit_bias {
        let mean_ok = bias.mean_abs_bias <= thresholds.mean_bias_issue;
        if !mean_ok {
            issues.push(format!("High mean bit bias: {:.4}", bias.mean_abs_bias));
        }
        if bias.flagged.len() > BIASED_COLUMNS_WARN {
            warnings.push(format!(
                "{} significantly biased bit positions (p < {})",
                bias.flagged.len(),
                bias.alpha
            ));
        }
        metrics.push(MetricRow {
            name: "Mean Bit Bias".into(),
            observed: bias.mean_abs_bias,
            expected: format!("<= {}", thresholds.mean_bias_issue),
            passed: mean_ok,
        });
        metrics.push(MetricRow {
            name: "Max Bit Bias".into(),
            observed: bias.max_abs_bias,
            expected: "<= 0.05".into(),
            passed: bias.max_abs_bias <= 0.05,
        });
    }

    if let Some(ham) = hamming {
        let drift = (ham.consecutive.summary.mean - ham.expected_mean).abs();
        let ok = drift <= thresholds.hamming_mean_tolerance;
        if !ok {
            issues.push(format!(
                "Hamming distance differs from expected: {drift:.2}"
            ));
        }
        metrics.push(MetricRow {
            name: "Hamming Distance".into(),
            observed: ham.consecutive.summary.mean,
            expected: format!(
                "{} ± {}",
                ham.expected_mean, thresholds.hamming_mean_tolerance
            ),
            passed: ok,
        });
    }

    if let Some(ent) = entropy {
        let deficit = 1.0 - ent.sample_summary.mean;
        let ok = deficit <= thresholds.entropy_deficit_issue;
        if !ok {
            issues.push(format!("Reduced sample entropy: {deficit:.4} below ideal"));
        } else if deficit > ENTROPY_DEFICIT_WARN {
            warnings.push(format!(
                "Sample entropy {deficit:.4} below ideal (within tolerance)"
            ));
        }
        if ent.min_entropy < MIN_ENTROPY_WARN {
            warnings.push(format!(
                "Pooled min-entropy {:.4} below {MIN_ENTROPY_WARN}",
                ent.min_entropy
            ));
        }
        metrics.push(MetricRow {
            name: "Shannon Entropy".into(),
            observed: ent.sample_summary.mean,
            expected: format!(">= {}", 1.0 - thresholds.entropy_deficit_issue),
            passed: ok,
        });
    }

    if let Some(auto) = autocorrelation {
        let ok = auto.flagged.is_empty();
        if !ok {
            issues.push(format!(
                "Significant autocorrelation at {} lag(s)",
                auto.flagged.len()
            ));
        }
        metrics.push(MetricRow {
            name: "Autocorrelation Max".into(),
            observed: auto.max_abs_correlation,
            expected: format!("<= {:.6}", auto.confidence_bound),
            passed: ok,
        });
    }

    if let Some(mono) = monobit {
        metrics.push(MetricRow {
            name: "Monobit p-value".into(),
            observed: mono.p_value,
            expected: format!(">= {}", mono.alpha),
            passed: mono.passed,
        });
    }
    if let Some(r) = runs {
        metrics.push(MetricRow {
            name: "Runs p-value".into(),
            observed: r.p_value,
            expected: format!(">= {}", r.alpha),
            passed: r.passed,
        });
    }
    if let Some(s) = serial {
        metrics.push(MetricRow {
            name: "Serial p-value".into(),
            observed: s.p_value,
            expected: format!(">= {}", s.alpha),
            passed: s.passed,
        });
    }

    if dropped.total() > 0 {
        warnings.push(format!(
            "{} records dropped during loading ({} parse, {} validation, {} duplicate)",
            dropped.total(),
            dropped.parse_errors,
            dropped.validation_errors,
            dropped.duplicate_epochs
        ));
    }
    warnings.extend_from_slice(unavailable);

    Summary {
        assessment: Assessment::from_issue_count(issues.len()),
        issues,
        warnings,
        metrics,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
