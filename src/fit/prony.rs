//! Prony (generalized Maxwell) spectrum fitting.
//!
//! Given a sampled relaxation curve (t̂ᵢ, Gᵢ), approximate it as
//!
//! ```text
//! G(t̂) ≈ Σⱼ gⱼ exp(-t̂/τⱼ),   gⱼ >= 0
//! ```
//!
//! with fixed log-spaced relaxation times τⱼ. Only the weights are unknown,
//! so the problem is linear; the nonnegativity constraint makes it an NNLS
//! problem with no closed form. Physical relaxation spectra are smooth and
//! heavily over-determined by the anchor count, so the solved weight vector
//! is sparse in practice.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitQuality, PronySpectrum, RelaxationCurve, SpectrumFit};
use crate::error::AppError;
use crate::math::{log_space, nnls};

/// Anchor span factor: anchors run from `min(t̂)/SPAN` to `max(t̂)*SPAN`,
/// deliberately wider than the data range to avoid edge bias in the fit.
const SPAN: f64 = 20.0;

/// Fit a nonnegative Prony series to a relaxation curve.
///
/// Deterministic for a fixed curve, `n_terms`, and `max_iter`; there is no
/// random initialization. An NNLS that exceeds `max_iter` is reported as a
/// nonconvergence error so a batch driver can skip that curve.
pub fn fit(curve: &RelaxationCurve, n_terms: usize, max_iter: usize) -> Result<SpectrumFit, AppError> {
    if curve.t_hat.len() != curve.g.len() {
        return Err(AppError::new(
            3,
            format!(
                "Relaxation curve is ragged: {} times vs {} moduli.",
                curve.t_hat.len(),
                curve.g.len()
            ),
        ));
    }
    if curve.len() < 2 {
        return Err(AppError::new(3, "Relaxation curve must have at least 2 points."));
    }
    if curve.t_hat.iter().any(|t| !t.is_finite() || *t <= 0.0) {
        return Err(AppError::new(3, "Relaxation curve times must be positive and finite."));
    }
    if curve.g.iter().any(|g| !g.is_finite()) {
        return Err(AppError::new(3, "Relaxation curve contains non-finite moduli."));
    }
    if n_terms < 2 {
        return Err(AppError::new(2, "Prony term count must be >= 2."));
    }

    let (t_min, t_max) = curve
        .t_hat
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        });
    let taus = log_space(t_min / SPAN, t_max * SPAN, n_terms)?;

    let n = curve.len();
    let design = DMatrix::from_fn(n, n_terms, |i, j| (-curve.t_hat[i] / taus[j]).exp());
    let y = DVector::from_column_slice(&curve.g);

    let weights = nnls(&design, &y, max_iter)?;

    let residual = &design * &weights - &y;
    let sse = residual.norm_squared();
    let quality = FitQuality {
        sse,
        rmse: (sse / n as f64).sqrt(),
        n,
    };

    Ok(SpectrumFit {
        spectrum: PronySpectrum {
            taus,
            weights: weights.iter().copied().collect(),
        },
        quality,
    })
}

/// Normalized fit error: residual norm over signal norm across the fitted
/// range. Used for diagnostics and round-trip checks.
pub fn relative_rms_error(curve: &RelaxationCurve, spectrum: &PronySpectrum) -> f64 {
    let mut residual_sq = 0.0;
    let mut signal_sq = 0.0;
    for (&t, &g) in curve.t_hat.iter().zip(&curve.g) {
        let r = spectrum.reconstruct(t) - g;
        residual_sq += r * r;
        signal_sq += g * g;
    }
    if signal_sq == 0.0 {
        return if residual_sq == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (residual_sq / signal_sq).sqrt()
}
