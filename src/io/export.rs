//! Export the combined moduli table to CSV.
//!
//! The four columns, their order, and their names are the contract surface
//! consumed by the downstream surrogate-training scripts; changing any of
//! them breaks drop-in compatibility.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::ZBlock;
use crate::error::AppError;

/// Write one row per (Z, ω) pair, blocks in the order given.
///
/// Refuses to write an empty table; the batch driver must never let a run
/// with zero surviving Z values reach this point.
pub fn write_moduli_csv(path: &Path, blocks: &[ZBlock]) -> Result<(), AppError> {
    if blocks.is_empty() {
        return Err(AppError::new(4, "Refusing to write an empty moduli table."));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::new(
                    2,
                    format!("Failed to create output directory '{}': {e}", parent.display()),
                )
            })?;
        }
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "Z,omega_tau_e,Gp_over_Ge,Gpp_over_Ge")
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;

    for block in blocks {
        let r = &block.response;
        for i in 0..r.len() {
            writeln!(
                out,
                "{},{:.10e},{:.10e},{:.10e}",
                block.z, r.omega[i], r.storage[i], r.loss[i]
            )
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
        }
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, FrequencyResponseCurve, PronySpectrum, SpectrumFit};

    fn block(z: u32) -> ZBlock {
        ZBlock {
            z,
            fit: SpectrumFit {
                spectrum: PronySpectrum {
                    taus: vec![1.0],
                    weights: vec![1.0],
                },
                quality: FitQuality {
                    sse: 0.0,
                    rmse: 0.0,
                    n: 1,
                },
            },
            response: FrequencyResponseCurve {
                omega: vec![0.1, 1.0],
                storage: vec![0.01, 0.5],
                loss: vec![0.1, 0.5],
            },
        }
    }

    #[test]
    fn writes_header_and_one_row_per_frequency() {
        let dir = std::env::temp_dir().join(format!("melt-export-{}", std::process::id()));
        let path = dir.join("moduli.csv");

        write_moduli_csv(&path, &[block(1), block(2)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Z,omega_tau_e,Gp_over_Ge,Gpp_over_Ge");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[3].starts_with("2,"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn refuses_empty_table() {
        let path = std::env::temp_dir().join("melt-export-empty.csv");
        let err = write_moduli_csv(&path, &[]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(!path.exists());
    }
}
