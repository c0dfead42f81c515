//! Unconstrained least squares solver.
//!
//! The NNLS active-set loop repeatedly solves small problems of the form:
//!
//! ```text
//! minimize Σ (y_i - e_i^T g)^2
//! ```
//!
//! restricted to the currently free columns of the exponential design matrix.
//!
//! Implementation choices:
//! - SVD solves the least-squares problem robustly even when the design is
//!   tall (many more time samples than free anchors). Nalgebra's `QR::solve`
//!   is intended for square systems and will panic here.
//! - Neighboring relaxation-time anchors produce nearly collinear columns,
//!   so we try progressively looser singular-value tolerances before giving
//!   up on a subproblem.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
