//! Run-summary formatting for terminal output.

use crate::app::pipeline::RunOutput;
use crate::domain::RunConfig;

/// Format a human-readable summary of a batch run.
pub fn format_run_summary(output: &RunOutput, config: &RunConfig) -> String {
    let mut s = String::new();

    let attempted = output.blocks.len() + output.skipped.len();
    let rows: usize = output.blocks.iter().map(|b| b.response.len()).sum();
    s.push_str(&format!(
        "Processed {}/{} Z values ({} rows, {} Prony terms per fit).\n",
        output.blocks.len(),
        attempted,
        rows,
        config.n_terms
    ));

    if !output.blocks.is_empty() {
        s.push_str("\n  Z    modes   rmse\n");
        for b in &output.blocks {
            s.push_str(&format!(
                "  {:<4} {:<7} {:.3e}\n",
                b.z,
                b.fit.spectrum.nonzero_terms(),
                b.fit.quality.rmse
            ));
        }
    }

    if !output.skipped.is_empty() {
        s.push_str("\nSkipped:\n");
        for f in &output.skipped {
            s.push_str(&format!("  Z={}: {}\n", f.z, f.reason));
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridSpec;

    #[test]
    fn summary_counts_blocks_and_skips() {
        let config = RunConfig {
            z_values: vec![0, 2],
            time_grid: GridSpec::new(1e-6, 1e3, 100),
            frequency_grid: GridSpec::new(1e-8, 1.0, 40),
            n_terms: 30,
            max_iter: 10_000,
        };
        let output = crate::app::pipeline::run_generate(&config).unwrap();
        let text = format_run_summary(&output, &config);
        assert!(text.contains("Processed 1/2 Z values"));
        assert!(text.contains("Skipped:"));
        assert!(text.contains("Z=0"));
    }
}
