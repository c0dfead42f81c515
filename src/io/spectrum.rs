//! Write spectrum JSON files.
//!
//! Spectrum JSON is the "portable" representation of one Z's fitted
//! relaxation spectrum:
//! - relaxation-time anchors and fitted weights
//! - fit quality (SSE / RMSE over the fitted range)
//! - a precomputed reconstruction grid for quick plotting
//!
//! The schema is defined by `domain::SpectrumFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{ReconstructionGrid, SpectrumFile, SpectrumFit};
use crate::error::AppError;
use crate::math::log_space;

/// Points in the precomputed reconstruction grid.
const GRID_POINTS: usize = 101;

/// Write a spectrum JSON file for one Z.
///
/// `t_span` is the (min, max) of the time grid the spectrum was fitted on;
/// the reconstruction grid covers the same range.
pub fn write_spectrum_json(
    path: &Path,
    z: u32,
    fit: &SpectrumFit,
    t_span: (f64, f64),
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create spectrum JSON '{}': {e}", path.display()),
        )
    })?;

    let t_hat = log_space(t_span.0, t_span.1, GRID_POINTS)?;
    let g = t_hat.iter().map(|&t| fit.spectrum.reconstruct(t)).collect();

    let out = SpectrumFile {
        tool: "melt".to_string(),
        z,
        n_terms: fit.spectrum.len(),
        spectrum: fit.spectrum.clone(),
        fit_quality: fit.quality.clone(),
        grid: ReconstructionGrid { t_hat, g },
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write spectrum JSON: {e}")))?;

    Ok(())
}
