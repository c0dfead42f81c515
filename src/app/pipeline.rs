//! Shared batch pipeline used by the CLI front-end.
//!
//! One entanglement number flows through three pure stages:
//! relaxation model -> Prony fit -> frequency response
//!
//! The batch driver runs every configured Z through that chain and isolates
//! per-Z numerical failures: a Z whose fit blows up or fails to converge is
//! recorded and skipped, never allowed to abort the batch. Only a batch with
//! zero survivors is an error.

use rayon::prelude::*;

use crate::domain::{RunConfig, ZBlock, ZFailure};
use crate::error::AppError;
use crate::{fit, model, response};

/// All computed outputs of a single batch run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Surviving per-Z results, ascending in Z.
    pub blocks: Vec<ZBlock>,
    /// Z values that were skipped, with reasons.
    pub skipped: Vec<ZFailure>,
}

/// Run one Z through the full stage chain.
pub fn process_z(
    z: u32,
    t_hat: &[f64],
    omega: &[f64],
    n_terms: usize,
    max_iter: usize,
) -> Result<ZBlock, AppError> {
    let curve = model::tube::evaluate(t_hat, z)?;
    let fit = fit::prony::fit(&curve, n_terms, max_iter)?;
    let response = response::evaluate(omega, &fit.spectrum);
    Ok(ZBlock { z, fit, response })
}

/// Execute the batch pipeline over the configured Z values.
///
/// The Z list is sorted and deduplicated first, and results are collected in
/// that order, so the output table is ascending in Z (and ascending in ω
/// within each Z) regardless of which worker finishes first.
pub fn run_generate(config: &RunConfig) -> Result<RunOutput, AppError> {
    if config.z_values.is_empty() {
        return Err(AppError::new(2, "No Z values configured."));
    }
    let t_hat = config.time_grid.build()?;
    let omega = config.frequency_grid.build()?;

    let mut z_values = config.z_values.clone();
    z_values.sort_unstable();
    z_values.dedup();

    // Each Z is pure given the shared read-only grids, so the batch fans out
    // across a worker pool; the indexed collect restores Z order.
    let results: Vec<Result<ZBlock, ZFailure>> = z_values
        .par_iter()
        .map(|&z| {
            process_z(z, &t_hat, &omega, config.n_terms, config.max_iter).map_err(|e| ZFailure {
                z,
                reason: e.to_string(),
            })
        })
        .collect();

    let mut blocks = Vec::new();
    let mut skipped = Vec::new();
    for r in results {
        match r {
            Ok(b) => blocks.push(b),
            Err(f) => skipped.push(f),
        }
    }

    if blocks.is_empty() {
        return Err(AppError::new(
            4,
            format!(
                "All {} Z values failed; no moduli table produced.",
                z_values.len()
            ),
        ));
    }

    Ok(RunOutput { blocks, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridSpec;

    fn small_config(z_values: Vec<u32>) -> RunConfig {
        RunConfig {
            z_values,
            time_grid: GridSpec::new(1e-6, 1e3, 120),
            frequency_grid: GridSpec::new(1e-8, 1.0, 50),
            n_terms: 40,
            max_iter: 10_000,
        }
    }

    #[test]
    fn one_bad_z_does_not_abort_the_batch() {
        let output = run_generate(&small_config(vec![0, 2, 5])).unwrap();

        let zs: Vec<u32> = output.blocks.iter().map(|b| b.z).collect();
        assert_eq!(zs, vec![2, 5]);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].z, 0);
        assert!(output.skipped[0].reason.contains("positive integer"));
    }

    #[test]
    fn blocks_come_out_ascending_even_from_unsorted_input() {
        let output = run_generate(&small_config(vec![7, 3, 5, 3])).unwrap();
        let zs: Vec<u32> = output.blocks.iter().map(|b| b.z).collect();
        assert_eq!(zs, vec![3, 5, 7]);
    }

    #[test]
    fn exhausted_batch_is_fatal() {
        let err = run_generate(&small_config(vec![0])).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn empty_z_list_is_a_config_error() {
        let err = run_generate(&small_config(vec![])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn end_to_end_reference_run_has_single_crossover() {
        // Reference grids and term count, one representative Z.
        let config = RunConfig {
            z_values: vec![10],
            time_grid: GridSpec::new(1e-10, 1e5, 1500),
            frequency_grid: GridSpec::new(1e-12, 1e1, 1300),
            n_terms: 200,
            max_iter: 10_000,
        };
        let output = run_generate(&config).unwrap();
        assert_eq!(output.blocks.len(), 1);

        let block = &output.blocks[0];
        let spectrum = &block.fit.spectrum;
        assert!(spectrum.nonzero_terms() >= 1);
        assert!(spectrum.nonzero_terms() <= 200);
        assert!(spectrum.weights.iter().all(|&g| g >= 0.0));

        let r = &block.response;
        assert_eq!(r.len(), 1300);
        for i in 0..r.len() {
            assert!(r.storage[i].is_finite() && r.storage[i] > 0.0);
            assert!(r.loss[i].is_finite() && r.loss[i] > 0.0);
        }

        // Loss-dominated at low frequency, storage-dominated at high
        // frequency, with exactly one crossover in between.
        assert!(r.loss[0] > r.storage[0]);
        assert!(r.storage[r.len() - 1] > r.loss[r.len() - 1]);
        let crossings = r
            .storage
            .iter()
            .zip(&r.loss)
            .map(|(gp, gpp)| gp > gpp)
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| w[0] != w[1])
            .count();
        assert_eq!(crossings, 1);
    }
}
