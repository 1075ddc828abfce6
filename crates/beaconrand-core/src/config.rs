//! Analysis configuration.
//!
//! Everything the battery needs travels in one explicit object — no
//! process-wide constants or mutable module state. The configuration is
//! echoed into the report so a run can be reproduced from its output.

use serde::{Deserialize, Serialize};

/// Default autocorrelation lag ceiling.
pub const DEFAULT_MAX_LAG: usize = 50;

/// Lag ceiling for the reduced battery.
pub const BASIC_MAX_LAG: usize = 20;

/// Default seed for the random-pair generator.
pub const DEFAULT_SEED: u64 = 42;

/// Which tests to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestSelection {
    /// Bias, Hamming, entropy, autocorrelation (lag ceiling capped at 20).
    Basic,
    /// All seven tests.
    Full,
}

/// Significance and issue thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Per-column binomial test significance level.
    pub bias_alpha: f64,
    /// Welch t-test significance level (consecutive vs random pairs).
    pub hamming_alpha: f64,
    /// Monobit test significance level.
    pub monobit_alpha: f64,
    /// Runs test significance level.
    pub runs_alpha: f64,
    /// Serial (2-bit) test significance level.
    pub serial_alpha: f64,
    /// Mean |bias − 0.5| above which an issue is raised.
    pub mean_bias_issue: f64,
    /// Allowed deviation of the consecutive Hamming mean from 128.
    pub hamming_mean_tolerance: f64,
    /// Mean sample-entropy deficit from 1.0 above which an issue is raised.
    pub entropy_deficit_issue: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            bias_alpha: 0.01,
            hamming_alpha: 0.05,
            monobit_alpha: 0.01,
            runs_alpha: 0.01,
            serial_alpha: 0.01,
            mean_bias_issue: 0.01,
            hamming_mean_tolerance: 2.0,
            entropy_deficit_issue: 0.01,
        }
    }
}

/// Full configuration for one battery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Autocorrelation lag ceiling; reduced automatically on short streams.
    pub max_lag: usize,
    /// Seed for random-pair sampling. Same input + same seed ⇒ same report.
    pub seed: u64,
    pub selection: TestSelection,
    pub thresholds: Thresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_lag: DEFAULT_MAX_LAG,
            seed: DEFAULT_SEED,
            selection: TestSelection::Full,
            thresholds: Thresholds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Effective lag ceiling for this selection.
    pub fn effective_max_lag(&self) -> usize {
        match self.selection {
            TestSelection::Basic => self.max_lag.min(BASIC_MAX_LAG),
            TestSelection::Full => self.max_lag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.max_lag, 50);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.selection, TestSelection::Full);
        assert_eq!(cfg.thresholds.bias_alpha, 0.01);
        assert_eq!(cfg.thresholds.hamming_alpha, 0.05);
        assert_eq!(cfg.thresholds.entropy_deficit_issue, 0.01);
    }

    #[test]
    fn basic_selection_caps_max_lag() {
        let cfg = AnalysisConfig {
            selection: TestSelection::Basic,
            ..Default::default()
        };
        assert_eq!(cfg.effective_max_lag(), BASIC_MAX_LAG);

        let small = AnalysisConfig {
            max_lag: 5,
            selection: TestSelection::Basic,
            ..Default::default()
        };
        assert_eq!(small.effective_max_lag(), 5);
    }
}
