//! Likhtman-McLeish relaxation modulus for entangled linear melts.
//!
//! `evaluate` returns the dimensionless relaxation function G(t̂)/Gₑ on a
//! time grid, for a given entanglement number Z. Everything is closed form:
//!
//! - reptation mode sum with contour-length-fluctuation corrections
//!   (the tube survival term)
//! - longitudinal Rouse modes of the chain inside the tube
//! - fast Rouse modes above the entanglement scale, hard-truncated at a
//!   fixed mode count
//!
//! Time is nondimensionalized by the entanglement relaxation time τₑ and the
//! result is already expressed relative to the plateau modulus Gₑ, so no
//! renormalization happens downstream.

use std::f64::consts::PI;

use crate::domain::RelaxationCurve;
use crate::error::AppError;
use crate::math::gamma_upper_neg_quarter;

/// Fluctuation-expansion coefficients for the disengagement time and the
/// plateau factor.
const C1: f64 = 1.69;
const C2: f64 = 4.17;
const C3: f64 = -1.55;

/// Contour-length-fluctuation amplitude and its time prefactor.
const CR: f64 = 1.8;
const CV: f64 = 1.0;

/// Amplitude of the early-time t^{1/4} tail in the tube survival function.
const TAIL_AMP: f64 = 0.306;

/// Hard truncation of the fast Rouse mode series. Empirical: the spectrum
/// fit and the surrogate trained on it are calibrated against this exact
/// cutoff, so it is not derived from a convergence test.
const P_MAX2: u32 = 5000;

/// exp(-u) underflows to zero below this; series terms past it contribute
/// nothing representable and summation stops early.
const EXP_UNDERFLOW: f64 = 745.0;

/// Disengagement-time ratio τd/τe.
fn tau_d_over_tau_e(z: f64) -> f64 {
    3.0 * z.powi(3) * (1.0 - 2.0 * C1 / z.sqrt() + C2 / z + C3 / z.powf(1.5))
}

/// Long-chain plateau factor G_f(Z).
fn plateau_factor(z: f64) -> f64 {
    1.0 - C1 / z.sqrt() + 2.0 / z - 1.24 / z.powf(1.5)
}

/// Largest odd reptation mode index retained in the explicit sum.
fn p_star(z: f64) -> u32 {
    let ps = (z / 10.0).sqrt().floor() as u32;
    if ps < 1 {
        1
    } else if ps % 2 == 0 {
        ps - 1
    } else {
        ps
    }
}

/// Crossover scale ε* between the explicit mode sum and the t^{1/4} tail.
fn eps_star(z: f64, coef1: f64, sum1: f64) -> f64 {
    (4.0 * TAIL_AMP / (1.0 - coef1 * sum1)).powi(4) / z.powi(4)
}

/// Tube survival function μ̂(t̂): explicit odd reptation modes plus the
/// incomplete-gamma tail that carries the early-time fluctuation spectrum.
fn mu_hat(t_hat: f64, z: f64, td: f64, coef1: f64, ps: u32, es: f64) -> f64 {
    let mut mu = 0.0;
    let mut p = 1u32;
    while p <= ps {
        let p2 = f64::from(p * p);
        let arg = t_hat * p2 / td;
        if arg < EXP_UNDERFLOW {
            mu += coef1 / p2 * (-arg).exp();
        }
        p += 2;
    }

    let x = es * t_hat;
    if x < EXP_UNDERFLOW {
        mu += TAIL_AMP / z * t_hat.powf(0.25) * gamma_upper_neg_quarter(x);
    }
    mu
}

/// Contour-length-fluctuation correction R(t̂).
fn clf_correction(t_hat: f64, z: f64) -> f64 {
    1.0 - (CR / z) * (CV * t_hat).powf(0.25)
}

/// Longitudinal Rouse modes (p = 1 .. Z-1); empty for Z = 1.
fn rouse_slow(x: f64, z: u32) -> f64 {
    if z <= 1 {
        return 0.0;
    }
    let mut sum = 0.0;
    for p in 1..z {
        let arg = f64::from(p * p) * x;
        if arg >= EXP_UNDERFLOW {
            break;
        }
        sum += (-arg).exp();
    }
    sum / (5.0 * f64::from(z))
}

/// Fast Rouse modes above the entanglement scale (p = Z .. P_MAX2-1).
fn rouse_fast(x: f64, z: u32) -> f64 {
    let mut sum = 0.0;
    for p in z..P_MAX2 {
        let arg = 2.0 * f64::from(p) * f64::from(p) * x;
        if arg >= EXP_UNDERFLOW {
            break;
        }
        sum += (-arg).exp();
    }
    sum / f64::from(z)
}

/// Evaluate G(t̂)/Gₑ on the given time grid.
///
/// The grid must hold at least 2 finite, strictly positive times. The curve
/// is expected to be non-increasing, but that is a property of the physics,
/// not something this function enforces; in the terminal zone the
/// fluctuation correction can push values a little below zero.
pub fn evaluate(t_hat: &[f64], z: u32) -> Result<RelaxationCurve, AppError> {
    if z < 1 {
        return Err(AppError::new(
            3,
            format!("Entanglement number must be a positive integer, got {z}."),
        ));
    }
    if t_hat.len() < 2 {
        return Err(AppError::new(3, "Time grid must have at least 2 points."));
    }
    if t_hat.iter().any(|t| !t.is_finite() || *t <= 0.0) {
        return Err(AppError::new(3, "Time grid must contain only positive finite values."));
    }

    let zf = f64::from(z);
    let td = tau_d_over_tau_e(zf);
    let coef1 = (8.0 / (PI * PI)) * plateau_factor(zf);
    let ps = p_star(zf);

    let mut sum1 = 0.0;
    let mut p = 1u32;
    while p <= ps {
        sum1 += 1.0 / f64::from(p * p);
        p += 2;
    }
    let es = eps_star(zf, coef1, sum1);

    let z2 = zf * zf;
    let mut g = Vec::with_capacity(t_hat.len());
    for &t in t_hat {
        let tube = 0.8 * mu_hat(t, zf, td, coef1, ps, es) * clf_correction(t, zf);
        let x = t / z2;
        g.push(tube + rouse_slow(x, z) + rouse_fast(x, z));
    }

    Ok(RelaxationCurve {
        t_hat: t_hat.to_vec(),
        g,
    })
}
