//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during batch generation
//! - exported to CSV/JSON
//! - reloaded later for plotting or surrogate training

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::math::log_space;

/// A log-spaced axis specification (inclusive endpoints).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub min: f64,
    pub max: f64,
    pub points: usize,
}

impl GridSpec {
    pub fn new(min: f64, max: f64, points: usize) -> Self {
        Self { min, max, points }
    }

    /// Materialize the grid. Fails on non-positive bounds or fewer than 2 points.
    pub fn build(&self) -> Result<Vec<f64>, AppError> {
        log_space(self.min, self.max, self.points)
    }
}

/// The relaxation modulus G(t̂)/Gₑ sampled on a dimensionless time grid, for
/// one entanglement number.
#[derive(Debug, Clone)]
pub struct RelaxationCurve {
    pub t_hat: Vec<f64>,
    pub g: Vec<f64>,
}

impl RelaxationCurve {
    pub fn len(&self) -> usize {
        self.t_hat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t_hat.is_empty()
    }
}

/// A discrete relaxation spectrum: `G(t̂) ≈ Σⱼ gⱼ exp(-t̂/τⱼ)`.
///
/// The relaxation times are fixed log-spaced anchors; only the weights are
/// fitted, and many of them are exactly zero after a nonnegative fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronySpectrum {
    pub taus: Vec<f64>,
    pub weights: Vec<f64>,
}

impl PronySpectrum {
    pub fn len(&self) -> usize {
        self.taus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taus.is_empty()
    }

    /// Evaluate the Maxwell series at one dimensionless time.
    pub fn reconstruct(&self, t_hat: f64) -> f64 {
        self.taus
            .iter()
            .zip(&self.weights)
            .map(|(&tau, &g)| g * (-t_hat / tau).exp())
            .sum()
    }

    /// Number of strictly positive weights.
    pub fn nonzero_terms(&self) -> usize {
        self.weights.iter().filter(|&&g| g > 0.0).count()
    }

    /// Instantaneous modulus `Σⱼ gⱼ` (the high-frequency storage asymptote).
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Fit quality diagnostics for a Prony fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// A fitted spectrum together with its quality record.
#[derive(Debug, Clone)]
pub struct SpectrumFit {
    pub spectrum: PronySpectrum,
    pub quality: FitQuality,
}

/// Storage and loss moduli sampled on a dimensionless frequency grid.
#[derive(Debug, Clone)]
pub struct FrequencyResponseCurve {
    pub omega: Vec<f64>,
    pub storage: Vec<f64>,
    pub loss: Vec<f64>,
}

impl FrequencyResponseCurve {
    pub fn len(&self) -> usize {
        self.omega.len()
    }

    pub fn is_empty(&self) -> bool {
        self.omega.is_empty()
    }
}

/// One entanglement number's completed pipeline outputs.
#[derive(Debug, Clone)]
pub struct ZBlock {
    pub z: u32,
    pub fit: SpectrumFit,
    pub response: FrequencyResponseCurve,
}

/// An entanglement number that was skipped, with the reason recorded for
/// operator visibility.
#[derive(Debug, Clone)]
pub struct ZFailure {
    pub z: u32,
    pub reason: String,
}

/// A full batch run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Entanglement numbers to process (sorted and deduplicated by the
    /// pipeline before use).
    pub z_values: Vec<u32>,
    pub time_grid: GridSpec,
    pub frequency_grid: GridSpec,
    /// Number of Prony anchor terms.
    pub n_terms: usize,
    /// NNLS iteration cap per Z.
    pub max_iter: usize,
}

/// A saved spectrum file (JSON).
///
/// The portable representation of one Z's fitted spectrum: anchors, weights,
/// fit quality, and a precomputed reconstruction grid for quick plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumFile {
    pub tool: String,
    pub z: u32,
    pub n_terms: usize,
    pub spectrum: PronySpectrum,
    pub fit_quality: FitQuality,
    pub grid: ReconstructionGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructionGrid {
    pub t_hat: Vec<f64>,
    pub g: Vec<f64>,
}
