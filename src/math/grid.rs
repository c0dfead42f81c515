//! Log-spaced grid generation.
//!
//! Every axis in this pipeline is geometric: the dimensionless time grid,
//! the frequency grid, and the Prony relaxation-time anchors all span many
//! decades, so they are generated as log-spaced sequences with inclusive
//! endpoints.

use crate::error::AppError;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(AppError::new(
            2,
            format!("Invalid grid range: min={min}, max={max} (must be finite, >0, and max>min)."),
        ));
    }
    if steps < 2 {
        return Err(AppError::new(2, "Grid steps must be >= 2."));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_includes_endpoints() {
        let v = log_space(1e-10, 1e5, 1500).unwrap();
        assert_eq!(v.len(), 1500);
        assert!((v[0] - 1e-10).abs() < 1e-22);
        assert!((v[v.len() - 1] - 1e5).abs() < 1e-7);
    }

    #[test]
    fn log_space_is_increasing() {
        let v = log_space(0.5, 200.0, 40).unwrap();
        for pair in v.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn log_space_rejects_bad_ranges() {
        assert!(log_space(0.0, 1.0, 10).is_err());
        assert!(log_space(1.0, 1.0, 10).is_err());
        assert!(log_space(2.0, 1.0, 10).is_err());
        assert!(log_space(f64::NAN, 1.0, 10).is_err());
        assert!(log_space(0.1, 1.0, 1).is_err());
    }
}
