//! Frequency-domain moduli from a fitted Prony spectrum.
//!
//! Each (τⱼ, gⱼ) pair is a Maxwell element; moduli of parallel elements add,
//! so the transform is a dense bilinear sum with no fitting and no state:
//!
//! ```text
//! G'(ω)  = Σⱼ gⱼ (ωτⱼ)² / (1 + (ωτⱼ)²)
//! G''(ω) = Σⱼ gⱼ (ωτⱼ)  / (1 + (ωτⱼ)²)
//! ```
//!
//! There is no failure mode: when `(ωτ)²` overflows, the element contributes
//! its asymptotic response (its full weight to storage, nothing to loss)
//! instead of propagating an infinity.

use crate::domain::{FrequencyResponseCurve, PronySpectrum};

/// Evaluate storage and loss moduli on a frequency grid.
pub fn evaluate(omega: &[f64], spectrum: &PronySpectrum) -> FrequencyResponseCurve {
    let mut storage = Vec::with_capacity(omega.len());
    let mut loss = Vec::with_capacity(omega.len());

    for &w in omega {
        let mut gp = 0.0;
        let mut gpp = 0.0;
        for (&tau, &g) in spectrum.taus.iter().zip(&spectrum.weights) {
            if g == 0.0 {
                continue;
            }
            let x = w * tau;
            let x2 = x * x;
            if x2.is_finite() {
                gp += g * x2 / (1.0 + x2);
                gpp += g * x / (1.0 + x2);
            } else {
                // Saturated element: storage at its plateau, loss negligible.
                gp += g;
            }
        }
        storage.push(gp);
        loss.push(gpp);
    }

    FrequencyResponseCurve {
        omega: omega.to_vec(),
        storage,
        loss,
    }
}
