//! Nonnegative least squares (Lawson-Hanson active set).
//!
//! Solves:
//!
//! ```text
//! minimize ‖A g - y‖²  subject to  g >= 0
//! ```
//!
//! The classic active-set scheme: grow a passive (free) column set one most-
//! violating coordinate at a time, solve the unconstrained subproblem on the
//! passive set, and step back toward feasibility whenever the subproblem
//! turns a passive coordinate negative. Deterministic for fixed inputs; no
//! random initialization.
//!
//! Every active-set change counts against `max_iter`. Exceeding the cap is
//! reported as nonconvergence, never returned as a silent wrong answer.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::solve_least_squares;

/// Coordinates whose value falls below this after a feasibility step are
/// returned to the active (zero) set.
const ZERO_CLAMP: f64 = 1e-14;

/// Solve `min ‖A g - y‖²` subject to `g >= 0`.
pub fn nnls(a: &DMatrix<f64>, y: &DVector<f64>, max_iter: usize) -> Result<DVector<f64>, AppError> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return Err(AppError::new(3, "NNLS design matrix must be non-empty."));
    }
    if y.len() != m {
        return Err(AppError::new(
            3,
            format!("NNLS dimension mismatch: {m} rows vs {} observations.", y.len()),
        ));
    }

    // Dual feasibility tolerance, scaled to the design's column norms so the
    // endgame does not churn on gradient entries that are pure roundoff.
    let norm1 = (0..n)
        .map(|j| a.column(j).iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max);
    let tol = 10.0 * f64::EPSILON * norm1 * m.max(n) as f64;

    let mut x = DVector::<f64>::zeros(n);
    let mut passive = vec![false; n];
    let mut iterations = 0usize;

    loop {
        // Gradient of the objective at the current iterate.
        let residual = y - a * &x;
        let w = a.transpose() * &residual;

        // Most-violating inactive coordinate, if any.
        let mut entering: Option<(usize, f64)> = None;
        for j in 0..n {
            if passive[j] || w[j] <= tol {
                continue;
            }
            if entering.is_none_or(|(_, best)| w[j] > best) {
                entering = Some((j, w[j]));
            }
        }
        let Some((j_new, _)) = entering else {
            // KKT conditions hold: x is the constrained minimizer.
            return Ok(x);
        };

        iterations += 1;
        if iterations > max_iter {
            return Err(AppError::new(
                5,
                format!("NNLS did not converge within {max_iter} iterations."),
            ));
        }
        passive[j_new] = true;

        // Re-solve on the passive set, stepping back toward feasibility until
        // the subproblem solution is strictly positive.
        loop {
            let cols: Vec<usize> = (0..n).filter(|&j| passive[j]).collect();
            if cols.is_empty() {
                x.fill(0.0);
                break;
            }
            let sub = a.select_columns(cols.iter());
            let Some(z) = solve_least_squares(&sub, y) else {
                return Err(AppError::new(
                    5,
                    "NNLS subproblem is too ill-conditioned to solve.",
                ));
            };

            if z.iter().all(|&v| v > 0.0) {
                x.fill(0.0);
                for (k, &j) in cols.iter().enumerate() {
                    x[j] = z[k];
                }
                break;
            }

            // Largest feasible step along (z - x) before a passive coordinate
            // reaches zero.
            let mut alpha = f64::INFINITY;
            for (k, &j) in cols.iter().enumerate() {
                if z[k] <= 0.0 {
                    let drop = x[j] - z[k];
                    if drop > 0.0 {
                        alpha = alpha.min(x[j] / drop);
                    }
                }
            }
            if !alpha.is_finite() {
                // Degenerate subproblem: every offending coordinate already
                // sits at zero. Deactivate them and re-solve.
                for (k, &j) in cols.iter().enumerate() {
                    if z[k] <= 0.0 {
                        passive[j] = false;
                        x[j] = 0.0;
                    }
                }
            } else {
                for (k, &j) in cols.iter().enumerate() {
                    x[j] += alpha * (z[k] - x[j]);
                    if x[j] <= ZERO_CLAMP {
                        passive[j] = false;
                        x[j] = 0.0;
                    }
                }
            }

            iterations += 1;
            if iterations > max_iter {
                return Err(AppError::new(
                    5,
                    format!("NNLS did not converge within {max_iter} iterations."),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nnls_recovers_interior_solution() {
        // Unconstrained optimum is already nonnegative, so NNLS must match it.
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let x = nnls(&a, &y, 100).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-10);
        assert!((x[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn nnls_zeroes_negative_components() {
        // Unconstrained solution is (2, -1); the constrained one clamps to 0.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let y = DVector::from_row_slice(&[2.0, -1.0]);
        let x = nnls(&a, &y, 100).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-10);
        assert_eq!(x[1], 0.0);
    }

    #[test]
    fn nnls_solution_is_always_nonnegative() {
        // Correlated columns with mixed-sign data.
        let a = DMatrix::from_row_slice(
            4,
            3,
            &[1.0, 0.9, 0.1, 0.8, 1.0, 0.3, 0.2, 0.4, 1.0, 0.5, 0.5, 0.5],
        );
        let y = DVector::from_row_slice(&[1.0, -0.5, 2.0, 0.3]);
        let x = nnls(&a, &y, 100).unwrap();
        assert!(x.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn nnls_reports_nonconvergence_at_tiny_cap() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 1.0]);
        let err = nnls(&a, &y, 1).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn nnls_accepts_already_optimal_zero() {
        // Negative data against a nonnegative design: g = 0 is optimal and
        // must be returned without consuming any iterations.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]);
        let y = DVector::from_row_slice(&[-1.0, -2.0]);
        let x = nnls(&a, &y, 0).unwrap();
        assert!(x.iter().all(|&v| v == 0.0));
    }
}
