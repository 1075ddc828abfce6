use beaconrand_core::{AnalysisConfig, TestSelection};
use beaconrand_tests::{AnalysisReport, run_battery};

pub struct AnalyzeCommandConfig<'a> {
    pub log_file: &'a str,
    pub output_path: Option<&'a str>,
    pub markdown_path: Option<&'a str>,
    pub basic: bool,
    pub max_lag: usize,
    pub seed: u64,
}

pub fn run(cfg: AnalyzeCommandConfig) {
    let samples = super::load_or_exit(cfg.log_file);
    let (epoch_start, epoch_end) = samples.epoch_range();
    println!(
        "Loaded {} samples, epochs {epoch_start}..{epoch_end} ({} dropped)",
        samples.len(),
        samples.dropped().total()
    );

    let config = AnalysisConfig {
        max_lag: cfg.max_lag,
        seed: cfg.seed,
        selection: if cfg.basic {
            TestSelection::Basic
        } else {
            TestSelection::Full
        },
        ..Default::default()
    };

    let report = run_battery(&samples, &config);
    print_summary(&report);

    if let Some(path) = cfg.output_path {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    eprintln!("Failed to write report to {path}: {e}");
                } else {
                    println!("\nReport saved to: {path}");
                }
            }
            Err(e) => eprintln!("Failed to serialize report: {e}"),
        }
    }

    if let Some(path) = cfg.markdown_path {
        let md = render_markdown(&report);
        if let Err(e) = std::fs::write(path, md) {
            eprintln!("Failed to write summary to {path}: {e}");
        } else {
            println!("Summary saved to: {path}");
        }
    }
}

fn print_summary(report: &AnalysisReport) {
    let summary = &report.summary;

    println!("\n{}", "=".repeat(64));
    println!("Assessment: {}", summary.assessment.describe());
    println!("{}", "=".repeat(64));

    if !summary.issues.is_empty() {
        println!("\nIssues:");
        for issue in &summary.issues {
            println!("  ✗ {issue}");
        }
    }
    if !summary.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &summary.warnings {
            println!("  ! {warning}");
        }
    }

    println!(
        "\n{:<22} {:>12} {:>14} {:>8}",
        "Metric", "Observed", "Expected", "Status"
    );
    println!("{}", "-".repeat(60));
    for row in &summary.metrics {
        println!(
            "{:<22} {:>12.6} {:>14} {:>8}",
            row.name,
            row.observed,
            row.expected,
            if row.passed { "✓" } else { "✗" }
        );
    }
}

/// Render the Markdown summary report.
fn render_markdown(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    let mut md = String::new();

    md.push_str("# RANDAO Randomness Analysis Report\n\n");
    md.push_str(&format!("Generated: {}\n\n", timestamp()));

    md.push_str("## Summary\n\n");
    md.push_str(&format!(
        "**Assessment:** {}\n\n",
        summary.assessment.describe()
    ));
    md.push_str(&format!("- Samples analyzed: {}\n", report.meta.samples));
    md.push_str(&format!(
        "- Epoch range: {}-{}\n",
        report.meta.epoch_start, report.meta.epoch_end
    ));
    md.push_str(&format!("- Bit length: {}\n", report.meta.bit_length));
    md.push_str(&format!(
        "- Records dropped: {}\n\n",
        report.meta.dropped.total()
    ));

    if !summary.issues.is_empty() {
        md.push_str("## Issues Found\n\n");
        for issue in &summary.issues {
            md.push_str(&format!("- {issue}\n"));
        }
        md.push('\n');
    }
    if !summary.warnings.is_empty() {
        md.push_str("## Warnings\n\n");
        for warning in &summary.warnings {
            md.push_str(&format!("- {warning}\n"));
        }
        md.push('\n');
    }

    md.push_str("## Key Metrics\n\n");
    md.push_str("| Metric | Observed | Expected | Status |\n");
    md.push_str("|--------|----------|----------|--------|\n");
    for row in &summary.metrics {
        md.push_str(&format!(
            "| {} | {:.6} | {} | {} |\n",
            row.name,
            row.observed,
            row.expected,
            if row.passed { "✓" } else { "✗" }
        ));
    }

    md.push_str("\n## Notes\n\n");
    md.push_str("Full numeric series are in the JSON report (`--output`).\n");
    md
}

fn timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", dur.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beaconrand_core::{DropCounters, SEED_BITS, Sample, SampleSet};

    fn small_set() -> SampleSet {
        let parsed = (0..8)
            .map(|i| {
                let bits = (0..SEED_BITS).map(|j| ((i + j) % 2) as u8).collect();
                Sample::new(i as u64, bits, None).unwrap()
            })
            .collect();
        SampleSet::new(parsed, DropCounters::default()).unwrap()
    }

    #[test]
    fn markdown_contains_assessment_and_table() {
        let report = run_battery(&small_set(), &AnalysisConfig::default());
        let md = render_markdown(&report);
        assert!(md.contains("# RANDAO Randomness Analysis Report"));
        assert!(md.contains("**Assessment:**"));
        assert!(md.contains("| Metric | Observed | Expected | Status |"));
        assert!(md.contains("Mean Bit Bias"));
    }

    #[test]
    fn markdown_lists_issues_for_bad_input() {
        let parsed = (0..10)
            .map(|i| Sample::new(i as u64, vec![0; SEED_BITS], None).unwrap())
            .collect();
        let set = SampleSet::new(parsed, DropCounters::default()).unwrap();
        let report = run_battery(&set, &AnalysisConfig::default());
        let md = render_markdown(&report);
        assert!(md.contains("## Issues Found"));
    }
}
